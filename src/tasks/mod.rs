// Task module
// Owner-scoped task records with today/done/upcoming/overdue bucketing.

pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

pub use error::TaskError;
pub use handlers::{
    create_task_handler, delete_task_handler, done_tasks_handler, mark_done_handler,
    overdue_tasks_handler, today_tasks_handler, update_task_handler, upcoming_tasks_handler,
};
pub use models::{Task, TaskBucket, TaskFields, TaskRequest};
pub use repository::TaskRepository;
pub use service::TaskService;

use chrono::Utc;

use super::Store;
use crate::error::AppError;
use crate::models::{Task, User};

const TASK_COLUMNS: &str = "id, title, description, completed, owner_id, created_at";

/// Restricts a statement to one task of one owner. Binds `$1` = task id, `$2` = owner id.
///
/// Every per-task statement ends with this predicate, so a task owned by someone
/// else is indistinguishable from one that does not exist.
const OWNED_TASK: &str = "WHERE id = $1 AND owner_id = $2";

/// Turns the row a per-task statement touched into the caller's result.
fn owned<T>(row: Option<T>) -> Result<T, AppError> {
    row.ok_or_else(|| AppError::NotFound("Task not found".into()))
}

impl Store {
    pub async fn create_task(
        &self,
        owner: &User,
        title: &str,
        description: &str,
    ) -> Result<Task, AppError> {
        let sql = format!(
            "INSERT INTO tasks (title, description, completed, owner_id, created_at)
             VALUES ($1, $2, FALSE, $3, $4)
             RETURNING {}",
            TASK_COLUMNS
        );
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(title)
            .bind(description)
            .bind(owner.id)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await?;

        log::debug!("user {} created task {}", owner.id, task.id);
        Ok(task)
    }

    /// All tasks of `owner`, oldest first.
    pub async fn list_tasks(&self, owner: &User) -> Result<Vec<Task>, AppError> {
        let sql = format!(
            "SELECT {} FROM tasks WHERE owner_id = $1 ORDER BY id",
            TASK_COLUMNS
        );
        let tasks = sqlx::query_as::<_, Task>(&sql)
            .bind(owner.id)
            .fetch_all(&self.pool)
            .await?;
        Ok(tasks)
    }

    /// Flips `completed` and returns the updated task.
    ///
    /// The flip happens inside a single statement, so concurrent toggles each
    /// apply on top of the last committed value.
    pub async fn toggle_task(&self, owner: &User, task_id: i64) -> Result<Task, AppError> {
        let sql = format!(
            "UPDATE tasks SET completed = NOT completed {} RETURNING {}",
            OWNED_TASK, TASK_COLUMNS
        );
        let updated = owned(
            sqlx::query_as::<_, Task>(&sql)
                .bind(task_id)
                .bind(owner.id)
                .fetch_optional(&self.pool)
                .await?,
        )?;

        log::debug!(
            "user {} set task {} completed={}",
            owner.id,
            updated.id,
            updated.completed
        );
        Ok(updated)
    }

    pub async fn delete_task(&self, owner: &User, task_id: i64) -> Result<(), AppError> {
        let sql = format!("DELETE FROM tasks {} RETURNING id", OWNED_TASK);
        let deleted = owned(
            sqlx::query_scalar::<_, i64>(&sql)
                .bind(task_id)
                .bind(owner.id)
                .fetch_optional(&self.pool)
                .await?,
        )?;

        log::debug!("user {} deleted task {}", owner.id, deleted);
        Ok(())
    }
}

use crate::{
    auth::{AuthenticatedUser, MaybeUser},
    error::AppError,
    models::TaskInput,
    routes::{html, see_other},
    store::Store,
    views,
};
use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

/// Renders the authenticated user's tasks.
///
/// Anonymous visitors are redirected to `/login` rather than rejected, since
/// this is a page load.
#[get("")]
pub async fn list_todos(
    store: web::Data<Store>,
    user: MaybeUser,
) -> Result<HttpResponse, AppError> {
    let user = match user.0 {
        Some(user) => user,
        None => return Ok(see_other("/login")),
    };

    let tasks = store.list_tasks(&user).await?;
    Ok(html(views::render_todos(&user, &tasks)))
}

/// Creates a task owned by the caller.
///
/// ## Responses:
/// - `303 See Other` to `/todos` on success.
/// - `401 Unauthorized` without a valid session.
/// - `422 Unprocessable Entity` when the title is blank or too long.
#[post("")]
pub async fn create_todo(
    AuthenticatedUser(user): AuthenticatedUser,
    store: web::Data<Store>,
    form: web::Form<TaskInput>,
) -> Result<HttpResponse, AppError> {
    let input = form.into_inner().normalized();
    input.validate()?;

    store
        .create_task(&user, &input.title, &input.description)
        .await?;
    Ok(see_other("/todos"))
}

/// Flips the completion flag of one of the caller's tasks.
///
/// A task that does not exist and a task owned by someone else both yield 404.
#[post("/{id}/toggle")]
pub async fn toggle_todo(
    AuthenticatedUser(user): AuthenticatedUser,
    store: web::Data<Store>,
    task_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    store.toggle_task(&user, task_id.into_inner()).await?;
    Ok(see_other("/todos"))
}

/// Deletes one of the caller's tasks; 404 otherwise.
#[post("/{id}/delete")]
pub async fn delete_todo(
    AuthenticatedUser(user): AuthenticatedUser,
    store: web::Data<Store>,
    task_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    store.delete_task(&user, task_id.into_inner()).await?;
    Ok(see_other("/todos"))
}

#[cfg(test)]
mod tests {
    use crate::models::TaskInput;
    use validator::Validate;

    #[test]
    fn test_normalized_input_validation() {
        let padded = TaskInput {
            title: "  Buy milk  ".to_string(),
            description: " 2 litres ".to_string(),
        }
        .normalized();
        assert_eq!(padded.title, "Buy milk");
        assert_eq!(padded.description, "2 litres");
        assert!(padded.validate().is_ok());

        let empty = TaskInput {
            title: String::new(),
            description: String::new(),
        }
        .normalized();
        assert!(
            empty.validate().is_err(),
            "Validation should fail for empty title."
        );
    }
}

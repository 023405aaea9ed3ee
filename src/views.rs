//! Server-rendered pages. Anything that came from a user is escaped first.

use crate::models::{Task, User};

fn style() -> &'static str {
    r#"
    body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; background: #f4f5f7; margin: 0; }
    .card { max-width: 480px; margin: 48px auto; background: #fff; border-radius: 12px; padding: 32px; box-shadow: 0 2px 12px rgba(0,0,0,.08); }
    h1 { margin-top: 0; font-size: 24px; }
    label { display: block; margin: 12px 0 4px; font-size: 14px; color: #444; }
    input[type=text], input[type=email], input[type=password], textarea {
        width: 100%; box-sizing: border-box; padding: 10px; border: 1px solid #ccc; border-radius: 8px; font-size: 14px;
    }
    button { margin-top: 16px; padding: 10px 16px; border: 0; border-radius: 8px; background: #4a6cf7; color: #fff; cursor: pointer; }
    .error { background: #fde8e8; color: #b42318; padding: 10px; border-radius: 8px; margin-bottom: 12px; }
    .notice { background: #e7f6ec; color: #1e7b3a; padding: 10px; border-radius: 8px; margin-bottom: 12px; }
    ul.todos { list-style: none; padding: 0; }
    ul.todos li { display: flex; align-items: center; gap: 8px; padding: 8px 0; border-bottom: 1px solid #eee; }
    ul.todos li.done .title { text-decoration: line-through; color: #999; }
    ul.todos form { margin: 0; }
    ul.todos button { margin: 0; padding: 4px 10px; font-size: 12px; }
    .desc { font-size: 12px; color: #777; }
    .muted { color: #888; font-size: 14px; }
    "#
}

/// Escapes the five HTML-significant characters.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en"><head>
<meta charset="utf-8"><meta name="viewport" content="width=device-width,initial-scale=1">
<title>{title}</title>
<style>{style}</style>
</head><body>
<div class="card">
{body}
</div>
</body></html>"#,
        title = escape(title),
        style = style(),
        body = body,
    )
}

fn error_block(error: Option<&str>) -> String {
    error
        .map(|e| format!(r#"<div class="error">{}</div>"#, escape(e)))
        .unwrap_or_default()
}

pub fn render_register(error: Option<&str>) -> String {
    let body = format!(
        r#"<h1>Create an account</h1>
{error_html}
<form method="POST" action="/register">
  <label for="email">Email</label>
  <input type="email" id="email" name="email" required>
  <label for="password">Password</label>
  <input type="password" id="password" name="password" required>
  <button type="submit">Register</button>
</form>
<p class="muted">Already registered? <a href="/login">Log in</a></p>"#,
        error_html = error_block(error),
    );
    page("Register", &body)
}

pub fn render_login(error: Option<&str>, registered: bool) -> String {
    let notice = if registered {
        r#"<div class="notice">Registration successful. Please log in.</div>"#
    } else {
        ""
    };
    let body = format!(
        r#"<h1>Log in</h1>
{notice}
{error_html}
<form method="POST" action="/login">
  <label for="email">Email</label>
  <input type="email" id="email" name="email" required>
  <label for="password">Password</label>
  <input type="password" id="password" name="password" required>
  <button type="submit">Log in</button>
</form>
<p class="muted">No account yet? <a href="/register">Register</a></p>"#,
        notice = notice,
        error_html = error_block(error),
    );
    page("Log in", &body)
}

fn render_task(task: &Task) -> String {
    let description = if task.description.is_empty() {
        String::new()
    } else {
        format!(r#"<div class="desc">{}</div>"#, escape(&task.description))
    };
    format!(
        r#"<li class="{class}">
  <form method="POST" action="/todos/{id}/toggle"><button type="submit">{toggle}</button></form>
  <div><span class="title">{title}</span>{description}</div>
  <form method="POST" action="/todos/{id}/delete"><button type="submit">Delete</button></form>
</li>"#,
        class = if task.completed { "done" } else { "open" },
        id = task.id,
        toggle = if task.completed { "Undo" } else { "Done" },
        title = escape(&task.title),
        description = description,
    )
}

pub fn render_todos(user: &User, tasks: &[Task]) -> String {
    let items = if tasks.is_empty() {
        r#"<p class="muted">Nothing to do yet.</p>"#.to_string()
    } else {
        let rows: Vec<String> = tasks.iter().map(render_task).collect();
        format!(r#"<ul class="todos">{}</ul>"#, rows.join("\n"))
    };
    let body = format!(
        r#"<h1>My to-dos</h1>
<p class="muted">Signed in as {email} &middot; <a href="/logout">Log out</a></p>
<form method="POST" action="/todos">
  <label for="title">Title</label>
  <input type="text" id="title" name="title" maxlength="200" required>
  <label for="description">Description</label>
  <textarea id="description" name="description" maxlength="1000"></textarea>
  <button type="submit">Add</button>
</form>
{items}"#,
        email = escape(&user.email),
        items = items,
    );
    page("My to-dos", &body)
}

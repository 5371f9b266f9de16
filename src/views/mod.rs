//! HTML views
//!
//! Each page is a function from its data to a [`Page`]. Record fields are
//! escaped when forms are sanitized, so they are written out as stored;
//! text that never went through a form (error details) is escaped here.
//!
//! The store is trusted to hold escaped text. Documents written by anything
//! other than these forms (imports, other clients of the same database)
//! must escape their string fields the same way, or they render as markup.

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod catalog;
pub mod error;
pub mod genres;

use axum::response::{Html, IntoResponse, Response};

use crate::validation::{escape, FieldError};

/// A rendered page body with its title, wrapped in the site layout on output
#[derive(Debug, Clone)]
pub struct Page {
    pub title: String,
    pub content: String,
}

impl Page {
    pub fn new(title: impl Into<String>, content: String) -> Self {
        Self {
            title: title.into(),
            content,
        }
    }

    pub fn render(&self) -> String {
        layout(&self.title, &self.content)
    }
}

impl IntoResponse for Page {
    fn into_response(self) -> Response {
        Html(self.render()).into_response()
    }
}

fn layout(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap@4.6.2/dist/css/bootstrap.min.css">
    <script src="https://code.jquery.com/jquery-3.5.1.slim.min.js"></script>
    <script src="https://cdn.jsdelivr.net/npm/bootstrap@4.6.2/dist/js/bootstrap.bundle.min.js"></script>
    <link rel="stylesheet" href="/public/stylesheets/style.css">
</head>
<body>
<div class="container-fluid">
  <div class="row">
    <div class="col-sm-2">
      <ul class="sidebar-nav">
        <li><a href="/catalog">Home</a></li>
        <li><a href="/catalog/books">All books</a></li>
        <li><a href="/catalog/authors">All authors</a></li>
        <li><a href="/catalog/genres">All genres</a></li>
        <li><a href="/catalog/bookinstances">All book-instances</a></li>
        <li><hr></li>
        <li><a href="/catalog/author/create">Create new author</a></li>
        <li><a href="/catalog/genre/create">Create new genre</a></li>
        <li><a href="/catalog/book/create">Create new book</a></li>
        <li><a href="/catalog/bookinstance/create">Create new book instance (copy)</a></li>
      </ul>
    </div>
    <div class="col-sm-10">
{content}
    </div>
  </div>
</div>
</body>
</html>
"#,
        title = escape(title),
        content = content,
    )
}

/// Validation messages under a form
pub(crate) fn error_list(errors: &[FieldError]) -> String {
    if errors.is_empty() {
        return String::new();
    }

    let items: String = errors
        .iter()
        .map(|e| format!("<li>{}</li>", escape(&e.message)))
        .collect();
    format!("<ul class=\"errors\">{}</ul>", items)
}

/// `<ul>` of links, or the fallback paragraph when there is nothing to list
pub(crate) fn link_list<T>(items: &[T], empty: &str, item: impl Fn(&T) -> String) -> String {
    if items.is_empty() {
        return format!("<p>{}</p>", empty);
    }

    let rows: String = items.iter().map(|i| format!("<li>{}</li>", item(i))).collect();
    format!("<ul>{}</ul>", rows)
}

pub(crate) fn text_input(id: &str, label: &str, placeholder: &str, value: &str, required: bool) -> String {
    format!(
        r#"<div class="form-group">
  <label for="{id}">{label}:</label>
  <input id="{id}" class="form-control" type="text" placeholder="{placeholder}" name="{id}" value="{value}"{required}>
</div>"#,
        required = if required { " required" } else { "" },
    )
}

pub(crate) fn date_input(id: &str, label: &str, value: &str) -> String {
    format!(
        r#"<div class="form-group">
  <label for="{id}">{label}:</label>
  <input id="{id}" class="form-control" type="date" name="{id}" value="{value}">
</div>"#
    )
}

pub(crate) fn submit_button(label: &str) -> String {
    format!(r#"<button class="btn btn-primary" type="submit">{label}</button>"#)
}

//! Book instance pages

use super::{books::status_badge, date_input, error_list, link_list, submit_button, text_input, Page};
use crate::{
    models::{Book, BookInstance, BookInstanceForm, InstanceStatus},
    validation::FieldError,
};

fn book_title(book: Option<&Book>) -> String {
    match book {
        Some(b) => format!(r#"<a href="{}">{}</a>"#, b.url(), b.title),
        None => "Unknown book".to_string(),
    }
}

pub fn list(instances: &[(BookInstance, Option<Book>)]) -> Page {
    let content = format!(
        "<h1>Book Instance List</h1>\n{}",
        link_list(instances, "There are no book copies in this library.", |(i, book)| {
            let title = book.as_ref().map(|b| b.title.as_str()).unwrap_or("Unknown book");
            let due = if i.status == InstanceStatus::Available {
                String::new()
            } else {
                format!(" (Due: {})", i.due_back_formatted())
            };
            format!(
                r#"<a href="{}">{} : {}</a> - {}{}"#,
                i.url(),
                title,
                i.imprint,
                status_badge(i.status),
                due
            )
        })
    );
    Page::new("Book Instance List", content)
}

fn facts(instance: &BookInstance, book: Option<&Book>) -> String {
    let due = if instance.status == InstanceStatus::Available {
        String::new()
    } else {
        format!("<p><strong>Due back:</strong> {}</p>", instance.due_back_formatted())
    };
    format!(
        r#"<p><strong>Title:</strong> {title}</p>
<p><strong>Imprint:</strong> {imprint}</p>
<p><strong>Status:</strong> {status}</p>
{due}"#,
        title = book_title(book),
        imprint = instance.imprint,
        status = status_badge(instance.status),
    )
}

pub fn detail(instance: &BookInstance, book: Option<&Book>) -> Page {
    let content = format!(
        r#"<h1>ID: {id}</h1>
{facts}
<hr>
<p><a href="{url}/delete">Delete BookInstance</a></p>
<p><a href="{url}/update">Update BookInstance</a></p>"#,
        id = instance.id.to_hex(),
        facts = facts(instance, book),
        url = instance.url(),
    );
    Page::new("Book Instance Detail", content)
}

pub fn form(title: &str, input: &BookInstanceForm, books: &[Book], errors: &[FieldError]) -> Page {
    let book_options: String = books
        .iter()
        .map(|b| {
            let hex = b.id.to_hex();
            let selected = if hex == input.book { " selected" } else { "" };
            format!(r#"<option value="{}"{}>{}</option>"#, hex, selected, b.title)
        })
        .collect();

    let status_options: String = InstanceStatus::ALL
        .iter()
        .map(|s| {
            let selected = if s.as_str() == input.status { " selected" } else { "" };
            format!(r#"<option value="{s}"{selected}>{s}</option>"#)
        })
        .collect();

    let content = format!(
        r#"<h1>{title}</h1>
<form method="POST">
<div class="form-group">
  <label for="book">Book:</label>
  <select id="book" class="form-control" name="book" required>
    <option value="">--Please select a book--</option>
    {book_options}
  </select>
</div>
{imprint}
{due_back}
<div class="form-group">
  <label for="status">Status:</label>
  <select id="status" class="form-control" name="status" required>
    {status_options}
  </select>
</div>
{submit}
</form>
{errors}"#,
        imprint = text_input(
            "imprint",
            "Imprint",
            "Publisher and date information",
            &input.imprint,
            true
        ),
        due_back = date_input(
            "due_back",
            "Date when book available",
            input.due_back.as_deref().unwrap_or_default()
        ),
        submit = submit_button("Submit"),
        errors = error_list(errors),
    );
    Page::new(title, content)
}

pub fn delete(instance: &BookInstance, book: Option<&Book>) -> Page {
    let content = format!(
        r#"<h1>Delete BookInstance: {id}</h1>
{facts}
<p>Do you really want to delete this BookInstance?</p>
<form method="POST">
{submit}
</form>"#,
        id = instance.id.to_hex(),
        facts = facts(instance, book),
        submit = submit_button("Delete"),
    );
    Page::new("Delete BookInstance", content)
}

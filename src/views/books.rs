//! Book pages

use super::{error_list, link_list, submit_button, text_input, Page};
use crate::{
    models::{Author, Book, BookForm, BookInstance, Genre, InstanceStatus},
    services::books::{BookDetail, BookSummary},
    validation::FieldError,
};

pub fn list(books: &[BookSummary]) -> Page {
    let content = format!(
        "<h1>Book List</h1>\n{}",
        link_list(books, "There are no books.", |s| {
            let author = s.author.as_ref().map(Author::name).unwrap_or_default();
            format!(r#"<a href="{}">{}</a> ({})"#, s.book.url(), s.book.title, author)
        })
    );
    Page::new("Book List", content)
}

pub(crate) fn status_badge(status: InstanceStatus) -> String {
    let class = match status {
        InstanceStatus::Available => "text-success",
        InstanceStatus::Maintenance => "text-danger",
        InstanceStatus::Loaned | InstanceStatus::Reserved => "text-warning",
    };
    format!(r#"<span class="{}">{}</span>"#, class, status)
}

fn copy_entries(instances: &[BookInstance], empty: &str) -> String {
    if instances.is_empty() {
        return format!("<p>{}</p>", empty);
    }

    instances
        .iter()
        .map(|i| {
            let due = if i.status == InstanceStatus::Available {
                String::new()
            } else {
                format!("<p><strong>Due back:</strong> {}</p>", i.due_back_formatted())
            };
            format!(
                r#"<hr>
<p>{status}</p>
<p><strong>Imprint:</strong> {imprint}</p>
{due}
<p><strong>Id:</strong> <a href="{url}">{id}</a></p>"#,
                status = status_badge(i.status),
                imprint = i.imprint,
                url = i.url(),
                id = i.id.to_hex(),
            )
        })
        .collect()
}

fn summary(detail: &BookDetail) -> String {
    let author = match &detail.author {
        Some(a) => format!(r#"<a href="{}">{}</a>"#, a.url(), a.name()),
        None => "Unknown".to_string(),
    };
    let genres = detail
        .genres
        .iter()
        .map(|g| format!(r#"<a href="{}">{}</a>"#, g.url(), g.name))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"<p><strong>Author:</strong> {author}</p>
<p><strong>Summary:</strong> {summary}</p>
<p><strong>ISBN:</strong> {isbn}</p>
<p><strong>Genre:</strong> {genres}</p>"#,
        summary = detail.book.summary,
        isbn = detail.book.isbn,
    )
}

pub fn detail(detail: &BookDetail) -> Page {
    let content = format!(
        r#"<h1>Title: {title}</h1>
{summary}
<div style="margin-left:20px;margin-top:20px">
  <h4>Copies</h4>
  {copies}
</div>
<hr>
<p><a href="{url}/delete">Delete book</a></p>
<p><a href="{url}/update">Update book</a></p>"#,
        title = detail.book.title,
        summary = summary(detail),
        copies = copy_entries(&detail.instances, "There are no copies of this book in the library."),
        url = detail.book.url(),
    );
    Page::new("Book Detail", content)
}

pub fn form(
    title: &str,
    input: &BookForm,
    authors: &[Author],
    genres: &[Genre],
    errors: &[FieldError],
) -> Page {
    let author_options: String = authors
        .iter()
        .map(|a| {
            let hex = a.id.to_hex();
            let selected = if hex == input.author { " selected" } else { "" };
            format!(r#"<option value="{}"{}>{}</option>"#, hex, selected, a.name())
        })
        .collect();

    let genre_boxes: String = genres
        .iter()
        .map(|g| {
            let hex = g.id.to_hex();
            let checked = if input.has_genre(&g.id) { " checked" } else { "" };
            format!(
                r#"<div style="display: inline; padding-right:10px;">
  <input class="checkbox-input" type="checkbox" name="genre" id="{hex}" value="{hex}"{checked}>
  <label for="{hex}">&nbsp;{name}</label>
</div>"#,
                name = g.name,
            )
        })
        .collect();

    let content = format!(
        r#"<h1>{title}</h1>
<form method="POST">
{title_input}
<div class="form-group">
  <label for="author">Author:</label>
  <select id="author" class="form-control" name="author" required>
    <option value="">--Please select an author--</option>
    {author_options}
  </select>
</div>
<div class="form-group">
  <label for="summary">Summary:</label>
  <textarea id="summary" class="form-control" placeholder="Summary" name="summary" required>{summary}</textarea>
</div>
{isbn_input}
<div class="form-group">
  <label>Genre:</label>
  <div>{genre_boxes}</div>
</div>
{submit}
</form>
{errors}"#,
        title_input = text_input("title", "Title", "Name of book", &input.title, true),
        summary = input.summary,
        isbn_input = text_input("isbn", "ISBN", "ISBN13", &input.isbn, true),
        submit = submit_button("Submit"),
        errors = error_list(errors),
    );
    Page::new(title, content)
}

pub fn delete(book: &Book, instances: &[BookInstance]) -> Page {
    let body = if instances.is_empty() {
        format!(
            r#"<p>Do you really want to delete this Book?</p>
<form method="POST">
{}
</form>"#,
            submit_button("Delete")
        )
    } else {
        format!(
            r#"<p><strong>Delete the following copies before attempting to delete this book.</strong></p>
<div style="margin-left:20px;margin-top:20px">
  <h4>Copies</h4>
  {}
</div>"#,
            copy_entries(instances, "")
        )
    };

    let content = format!(
        r#"<h1>Delete Book: <a href="{}">{}</a></h1>
<p><strong>ISBN:</strong> {}</p>
{}"#,
        book.url(),
        book.title,
        book.isbn,
        body
    );
    Page::new("Delete Book", content)
}

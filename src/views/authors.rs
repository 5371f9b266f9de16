//! Author pages

use super::{date_input, error_list, link_list, submit_button, text_input, Page};
use crate::{
    models::{Author, AuthorForm, Book},
    validation::FieldError,
};

pub fn list(authors: &[Author]) -> Page {
    let content = format!(
        "<h1>Author List</h1>\n{}",
        link_list(authors, "There are no authors.", |a| {
            format!(
                r#"<a href="{}">{}</a> ({} - {})"#,
                a.url(),
                a.name(),
                a.date_of_birth_formatted(),
                a.date_of_death_formatted()
            )
        })
    );
    Page::new("Author List", content)
}

fn book_entries(books: &[Book]) -> String {
    link_list(books, "This author has no books.", |b| {
        format!(r#"<a href="{}">{}</a><p>{}</p>"#, b.url(), b.title, b.summary)
    })
}

fn heading(author: &Author) -> String {
    let lifespan = author
        .lifespan()
        .unwrap_or_else(|| "Lifespan data not available".to_string());
    format!(
        "<p>{} - {} ({})</p>",
        author.date_of_birth_formatted(),
        author.date_of_death_formatted(),
        lifespan
    )
}

pub fn detail(author: &Author, books: &[Book]) -> Page {
    let content = format!(
        r#"<h1>Author: {name}</h1>
{heading}
<div style="margin-left:20px;margin-top:20px">
  <h4>Books</h4>
  {books}
</div>
<hr>
<p><a href="{url}/delete">Delete author</a></p>
<p><a href="{url}/update">Update author</a></p>"#,
        name = author.name(),
        heading = heading(author),
        books = book_entries(books),
        url = author.url(),
    );
    Page::new("Author Detail", content)
}

pub fn form(title: &str, input: &AuthorForm, errors: &[FieldError]) -> Page {
    let content = format!(
        r#"<h1>{title}</h1>
<form method="POST">
{first_name}
{family_name}
{date_of_birth}
{date_of_death}
{submit}
</form>
{errors}"#,
        first_name = text_input("first_name", "First Name", "First name", &input.first_name, true),
        family_name = text_input("family_name", "Family Name", "Family name", &input.family_name, true),
        date_of_birth = date_input(
            "date_of_birth",
            "Date of birth",
            input.date_of_birth.as_deref().unwrap_or_default()
        ),
        date_of_death = date_input(
            "date_of_death",
            "Date of death",
            input.date_of_death.as_deref().unwrap_or_default()
        ),
        submit = submit_button("Submit"),
        errors = error_list(errors),
    );
    Page::new(title, content)
}

pub fn delete(author: &Author, books: &[Book]) -> Page {
    let body = if books.is_empty() {
        format!(
            r#"<p>Do you really want to delete this Author?</p>
<form method="POST">
{}
</form>"#,
            submit_button("Delete")
        )
    } else {
        format!(
            r#"<p><strong>Delete the following books before attempting to delete this author.</strong></p>
<div style="margin-left:20px;margin-top:20px">
  <h4>Books</h4>
  {}
</div>"#,
            book_entries(books)
        )
    };

    let content = format!(
        "<h1>Delete Author: {}</h1>\n{}\n{}",
        author.name(),
        heading(author),
        body
    );
    Page::new("Delete Author", content)
}

//! Genre pages

use super::{error_list, link_list, submit_button, text_input, Page};
use crate::{
    models::{Book, Genre, GenreForm},
    validation::FieldError,
};

pub fn list(genres: &[Genre]) -> Page {
    let content = format!(
        "<h1>Genre List</h1>\n{}",
        link_list(genres, "There are no genres.", |g| {
            format!(r#"<a href="{}">{}</a>"#, g.url(), g.name)
        })
    );
    Page::new("Genre List", content)
}

fn book_entries(books: &[Book]) -> String {
    link_list(books, "This genre has no books.", |b| {
        format!(r#"<a href="{}">{}</a><p>{}</p>"#, b.url(), b.title, b.summary)
    })
}

pub fn detail(genre: &Genre, books: &[Book]) -> Page {
    let content = format!(
        r#"<h1>Genre: {name}</h1>
<div style="margin-left:20px;margin-top:20px">
  <h4>Books</h4>
  {books}
</div>
<hr>
<p><a href="{url}/delete">Delete genre</a></p>
<p><a href="{url}/update">Update genre</a></p>"#,
        name = genre.name,
        books = book_entries(books),
        url = genre.url(),
    );
    Page::new("Genre Detail", content)
}

pub fn form(title: &str, input: &GenreForm, errors: &[FieldError]) -> Page {
    let content = format!(
        r#"<h1>{title}</h1>
<form method="POST">
{name}
{submit}
</form>
{errors}"#,
        name = text_input("name", "Genre", "Fantasy, Poetry etc.", &input.name, true),
        submit = submit_button("Submit"),
        errors = error_list(errors),
    );
    Page::new(title, content)
}

/// Delete confirmation; lists the books that keep the genre alive
pub fn delete(genre: &Genre, books: &[Book]) -> Page {
    let body = if books.is_empty() {
        format!(
            r#"<p>Do you really want to delete this Genre?</p>
<form method="POST">
{}
</form>"#,
            submit_button("Delete")
        )
    } else {
        format!(
            r#"<p><strong>Delete the following books before attempting to delete this genre.</strong></p>
<div style="margin-left:20px;margin-top:20px">
  <h4>Books</h4>
  {}
</div>"#,
            book_entries(books)
        )
    };

    let content = format!("<h1>Delete Genre: {}</h1>\n{}", genre.name, body);
    Page::new("Delete Genre", content)
}

//! Catalog home page

use super::Page;
use crate::services::catalog::CatalogCounts;

pub fn index(counts: &CatalogCounts) -> Page {
    let content = format!(
        r#"<h1>Local Library Home</h1>
<p>Welcome to <em>LocalLibrary</em>, a very basic website developed with Rust.</p>
<h2>Dynamic content</h2>
<p>The library has the following record counts:</p>
<ul>
  <li><strong>Books:</strong> {books}</li>
  <li><strong>Copies:</strong> {book_instances}</li>
  <li><strong>Copies available:</strong> {available}</li>
  <li><strong>Authors:</strong> {authors}</li>
  <li><strong>Genres:</strong> {genres}</li>
</ul>"#,
        books = counts.books,
        book_instances = counts.book_instances,
        available = counts.book_instances_available,
        authors = counts.authors,
        genres = counts.genres,
    );
    Page::new("Local Library Home", content)
}

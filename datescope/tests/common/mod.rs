#![allow(dead_code)]

use datescope::prelude::*;
use once_cell::sync::Lazy;

#[derive(Table)]
#[table_name = "books"]
pub struct Book;

#[derive(Table)]
#[table_name = "authors"]
pub struct Author;

impl Scoped for Book {
    type Query = Select<Book>;

    fn scopes() -> &'static ScopeSet<Select<Book>> {
        static SCOPES: Lazy<ScopeSet<Select<Book>>> =
            Lazy::new(|| ScopeSet::new().date_range("created").date_range("updated"));
        &SCOPES
    }
}

pub fn join_books(query: Select<Author>) -> Select<Author> {
    query.inner_join(Join::foreign::<Author, Book>("id", "author_id"))
}

impl Scoped for Author {
    type Query = Select<Author>;

    fn scopes() -> &'static ScopeSet<Select<Author>> {
        static SCOPES: Lazy<ScopeSet<Select<Author>>> = Lazy::new(|| {
            ScopeSet::new()
                .register(
                    DateRange::new("with_any_books_created")
                        .attribute(|| Column::of::<Book>("created_at"))
                        .relation(join_books),
                )
                .register(delegate::<Book, _>("books_created").relation(join_books))
                .register(
                    delegate::<Book, _>("with_any_books_written")
                        .relation(join_books)
                        .scope("created"),
                )
                .register(delegate::<Book, _>("books_published").relation(join_books))
        });
        &SCOPES
    }
}

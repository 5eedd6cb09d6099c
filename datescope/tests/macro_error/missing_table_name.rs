use datescope::prelude::*;

#[derive(Table)]
struct Book;

fn main() {}

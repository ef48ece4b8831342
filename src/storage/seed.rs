//! Sample authors and books for development servers

use crate::resources::author::Author;
use crate::resources::book::Book;
use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

fn book(id: u128, title: &str, description: &str) -> Book {
    Book {
        id: Uuid::from_u128(id),
        title: title.to_string(),
        description: Some(description.to_string()),
        author_id: Uuid::nil(),
    }
}

fn author(
    id: u128,
    first_name: &str,
    last_name: &str,
    date_of_birth: DateTime<Utc>,
    date_of_death: Option<DateTime<Utc>>,
    genre: &str,
    books: Vec<Book>,
) -> Author {
    Author {
        id: Uuid::from_u128(id),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        date_of_birth,
        date_of_death,
        genre: genre.to_string(),
        books,
    }
}

/// Authors (with their books) loaded when `seed_data` is enabled
pub fn authors() -> Vec<Author> {
    vec![
        author(
            0x25320c5e_f58a_4b1f_b63a_8ee07a840bdf,
            "Stephen",
            "King",
            date(1947, 9, 21),
            None,
            "Horror",
            vec![
                book(
                    0xc7ba6add_09c4_45f8_8dd0_eaca221e5d93,
                    "The Shining",
                    "The Shining is a horror novel by American author Stephen King.",
                ),
                book(
                    0xa3749477_f823_4124_aa4a_fc9ad5e79cd6,
                    "Misery",
                    "Misery is a psychological horror thriller novel by Stephen King.",
                ),
                book(
                    0x70a1f9b9_0a37_4c1a_99b1_c7709fc64167,
                    "It",
                    "It is a horror novel by American author Stephen King.",
                ),
            ],
        ),
        author(
            0x76053df4_6687_4353_8937_b45556748abe,
            "George",
            "RR Martin",
            date(1948, 9, 20),
            None,
            "Fantasy",
            vec![book(
                0x447eb762_95e9_4c31_95e1_b20053fbe215,
                "A Game of Thrones",
                "A Game of Thrones is the first novel in A Song of Ice and Fire.",
            )],
        ),
        author(
            0x412c3012_d891_4f5e_9613_ff7aa63e6bb3,
            "Neil",
            "Gaiman",
            date(1960, 11, 10),
            None,
            "Fantasy",
            vec![book(
                0x9edf91ee_ab77_4521_a402_5f188bc0c577,
                "American Gods",
                "American Gods is a Hugo and Nebula Award-winning novel by Neil Gaiman.",
            )],
        ),
        author(
            0x578359b7_1967_41d6_8b87_64ab7605587e,
            "Tom",
            "Lanoye",
            date(1958, 8, 27),
            None,
            "Various",
            vec![book(
                0x01457142_358f_495f_aafa_fb23de3d67e9,
                "Speechless",
                "Good-natured and often humorous, Speechless is at times a 'song of curses'.",
            )],
        ),
        author(
            0xf74d6899_9ed2_4137_9876_66b070553f8f,
            "Douglas",
            "Adams",
            date(1952, 3, 11),
            Some(date(2001, 5, 11)),
            "Science fiction",
            vec![book(
                0xe57b605f_8b3c_4089_b672_6ce9e6d6c23f,
                "The Hitchhiker's Guide to the Galaxy",
                "The Hitchhiker's Guide to the Galaxy is the first of five books in the series.",
            )],
        ),
        author(
            0xa1da1d8e_1988_4634_b538_a01709477b77,
            "Jens",
            "Lapidus",
            date(1974, 5, 24),
            None,
            "Thriller",
            vec![book(
                0x1325360c_8253_473a_a20f_55c269c20407,
                "Easy Money",
                "Easy Money or Snabba cash is a novel from 2006 by Jens Lapidus.",
            )],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_ids_are_unique() {
        let authors = authors();
        let author_ids: HashSet<_> = authors.iter().map(|a| a.id).collect();
        let book_ids: HashSet<_> = authors
            .iter()
            .flat_map(|a| a.books.iter().map(|b| b.id))
            .collect();
        assert_eq!(author_ids.len(), authors.len());
        assert_eq!(book_ids.len(), authors.iter().map(|a| a.books.len()).sum::<usize>());
    }

    #[test]
    fn test_seed_books_have_distinct_descriptions() {
        for book in authors().iter().flat_map(|a| a.books.iter()) {
            assert_ne!(book.description.as_deref(), Some(book.title.as_str()));
        }
    }
}

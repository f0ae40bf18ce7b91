table! {
    annotations (id) {
        id -> Integer,
        verse_id -> Integer,
        annotation_type -> Text,
        color -> Nullable<Text>,
        note_text -> Nullable<Text>,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

table! {
    books (id) {
        id -> Integer,
        name -> Text,
        abbreviation -> Text,
        testament -> Text,
        book_order -> Integer,
        chapter_count -> Integer,
    }
}

table! {
    chapters (id) {
        id -> Integer,
        book_id -> Integer,
        number -> Integer,
        verse_count -> Integer,
    }
}

table! {
    verses (id) {
        id -> Integer,
        chapter_id -> Integer,
        number -> Integer,
        text -> Text,
        version -> Text,
    }
}

joinable!(annotations -> verses (verse_id));
joinable!(chapters -> books (book_id));
joinable!(verses -> chapters (chapter_id));

allow_tables_to_appear_in_same_query!(annotations, books, chapters, verses);

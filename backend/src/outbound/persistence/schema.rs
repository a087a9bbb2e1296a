//! Diesel table definitions. Keep in step with `backend/migrations`.

diesel::table! {
    /// One row per ebook. `document` holds the full record, including any
    /// cached `description_<lang>` members; `category` mirrors the document
    /// value so it can be indexed.
    ebooks (id) {
        id -> Int8,
        category -> Text,
        document -> Jsonb,
    }
}

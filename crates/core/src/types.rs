/// Ticket identifiers are opaque, store-generated strings.
pub type TicketId = String;

/// All timestamps are UTC and serialize as ISO-8601.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

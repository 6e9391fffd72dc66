pub mod director;
pub mod genre;
pub mod movie;

/// Tables that share the `{id, name}` shape and are mutated through the same
/// handler contract.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NamedTable {
    Genre,
    Director,
}

impl NamedTable {
    pub fn as_str(self) -> &'static str {
        match self {
            NamedTable::Genre => "genre",
            NamedTable::Director => "director",
        }
    }
}

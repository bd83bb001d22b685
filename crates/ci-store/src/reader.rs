//! Read-only access to the derived store.
//!
//! The reporting stage opens the store through here so it can never
//! mutate what the ferry wrote.

use std::path::Path;

use rusqlite::{Connection, OpenFlags};

use crate::error::StoreError;
use crate::raw::list_tables;
use crate::schema::TableName;

/// Open a derived store read-only, verifying the six tables are present.
pub fn open_readonly(path: &Path) -> Result<Connection, StoreError> {
    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
    let tables = list_tables(&conn)?;
    for required in TableName::ALL {
        if !tables.iter().any(|t| t == required.as_str()) {
            return Err(StoreError::TableNotFound(required.as_str().to_string()));
        }
    }
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_store_missing_tables() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.sqlite");
        let conn = Connection::open(&path).unwrap();
        conn.execute("CREATE TABLE cafes_complete (cafe_id INTEGER)", [])
            .unwrap();
        drop(conn);

        let err = open_readonly(&path).unwrap_err();
        assert!(matches!(err, StoreError::TableNotFound(_)));
    }

    #[test]
    fn opens_complete_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("derived.sqlite");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(&crate::schema::derived_store_ddl()).unwrap();
        drop(conn);

        assert!(open_readonly(&path).is_ok());
    }
}

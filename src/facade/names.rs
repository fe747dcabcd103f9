use crate::facade::error::FacadeError;
use crate::model::NameId;

/// Street names packed into a single blob with an offset index
/// (spec.md §4.1, `.osrm.names`), so a lookup is a slice read rather
/// than an allocation.
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    blob: Vec<u8>,
    offsets: Vec<u32>,
}

impl NameTable {
    /// `offsets` must have `names.len() + 1` entries, `offsets[i]` the
    /// start of name `i` and `offsets[i+1]` one past its end, matching
    /// the upstream name-table layout.
    pub fn new(blob: Vec<u8>, offsets: Vec<u32>) -> Self {
        NameTable { blob, offsets }
    }

    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut blob = Vec::new();
        let mut offsets = vec![0u32];
        for name in names {
            blob.extend_from_slice(name.as_bytes());
            offsets.push(blob.len() as u32);
        }
        NameTable { blob, offsets }
    }

    pub fn len(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: NameId) -> Result<&str, FacadeError> {
        let idx = id as usize;
        let (start, end) = self
            .offsets
            .get(idx)
            .zip(self.offsets.get(idx + 1))
            .ok_or(FacadeError::NameOutOfRange(id))?;
        std::str::from_utf8(&self.blob[*start as usize..*end as usize])
            .map_err(|_| FacadeError::CorruptData(format!("name {id} is not valid utf-8")))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn retrieves_names_by_id() {
        let table = NameTable::from_names(["Main St", "Elm Ave", ""]);
        assert_eq!(table.get(0).unwrap(), "Main St");
        assert_eq!(table.get(1).unwrap(), "Elm Ave");
        assert_eq!(table.get(2).unwrap(), "");
        assert!(table.get(3).is_err());
    }
}

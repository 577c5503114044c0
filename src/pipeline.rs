//! One input stream from bytes to files: decode, walk, save.

use crate::core::SaveError;
use crate::input::read_documents;
use crate::walker::walk;
use crate::writer::ResourceWriter;

/// Save every resource found in `input` and return how many were written.
///
/// Documents are processed strictly in order and the first error aborts the
/// stream; files written before the failure are left in place.
pub fn save_stream(input: &str, writer: &ResourceWriter) -> Result<usize, SaveError> {
    let mut saved = 0;

    for document in read_documents(input) {
        let document = document?;
        walk(&document, |resource| {
            writer.save(resource)?;
            saved += 1;
            Ok(())
        })?;
    }

    if saved == 0 {
        tracing::warn!("no resources found in input");
    } else {
        tracing::info!(resources = saved, "saved resources");
    }
    Ok(saved)
}

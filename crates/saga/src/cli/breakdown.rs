//! Breakdown planning and assembly commands.

use super::{read_input, read_optional};
use saga::{
    BreakdownParts, SagaResult, breakdown_chunk_instruction, build_breakdown_ranges,
    compose_breakdown_content, extract_breakdown_meta_sections, join_breakdown_chunks,
};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Print the chunk ranges for `chapters`, optionally with their instructions.
#[instrument]
pub fn plan_breakdown(chapters: u32, chunk_size: u32, instructions: bool) {
    let ranges = build_breakdown_ranges(chapters, chunk_size);
    debug!(chunk_count = ranges.len(), "Planned breakdown");

    for (index, range) in ranges.iter().enumerate() {
        println!("Chunk {}: chapters {}", index + 1, range);
        if instructions {
            println!("  {}", breakdown_chunk_instruction(*range, chapters));
        }
    }
}

/// Print a composed breakdown document.
#[instrument(skip_all, fields(table_chunks = tables.len()))]
pub fn compose_breakdown(
    meta: Option<&Path>,
    overview: Option<&Path>,
    tables: &[PathBuf],
    rules: Option<&Path>,
) -> SagaResult<()> {
    let meta = extract_breakdown_meta_sections(&read_optional(meta)?);

    let overview = match overview {
        Some(path) => read_input(path)?,
        None => meta.overview,
    };
    let rules = match rules {
        Some(path) => read_input(path)?,
        None => meta.rules,
    };
    let chunks = tables
        .iter()
        .map(|path| read_input(path))
        .collect::<SagaResult<Vec<_>>>()?;
    let chapter_table = join_breakdown_chunks(&chunks);

    println!(
        "{}",
        compose_breakdown_content(BreakdownParts {
            overview: &overview,
            chapter_table: &chapter_table,
            rules: &rules,
        })
    );
    Ok(())
}

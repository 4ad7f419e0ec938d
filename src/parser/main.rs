use crate::error::{LineWarning, NmeaError};
use crate::kinematics::derive_records;
use crate::parser::assembler::assemble_fixes;
use crate::parser::sentence::parse_lines;
use crate::statistics::compute_statistics;
use crate::types::*;
use crate::Result;
use anyhow::Context;
use std::path::Path;

/// Fixes and warnings collected from one input source
#[derive(Debug, Clone, Default)]
pub struct ParsedSource {
    pub fixes: Vec<GpsFix>,
    pub warnings: Vec<LineWarning>,
}

/// Parse every line of one decoded input source
///
/// Malformed RMC sentences are logged and collected; they never stop the pass.
pub fn parse_source(source_index: usize, text: &str) -> ParsedSource {
    let mut parsed = ParsedSource::default();

    for outcome in parse_lines(source_index, text) {
        match outcome {
            Ok(fix) => parsed.fixes.push(fix),
            Err(warning) => {
                log::warn!("{}", warning);
                parsed.warnings.push(warning);
            }
        }
    }

    log::debug!(
        "Source {}: {} fixes, {} malformed sentences",
        source_index + 1,
        parsed.fixes.len(),
        parsed.warnings.len()
    );

    parsed
}

/// Run parse, assembly, derivation and aggregation over decoded sources
///
/// Sources are taken in the order given. An input without any valid fix gives
/// an [`Analysis`] whose [`Analysis::has_data`] is false.
pub fn analyze_sources<S: AsRef<str>>(sources: &[S], options: &AnalysisOptions) -> Analysis {
    let indexed: Vec<(usize, &str)> = sources
        .iter()
        .map(AsRef::<str>::as_ref)
        .enumerate()
        .collect();
    analyze_indexed_sources(&indexed, options)
}

/// Like [`analyze_sources`], with the source index of each text given
/// explicitly
///
/// Warnings carry the given index, so callers that drop unreadable inputs keep
/// the numbering of their own input list.
pub fn analyze_indexed_sources<S: AsRef<str>>(
    sources: &[(usize, S)],
    options: &AnalysisOptions,
) -> Analysis {
    let mut warnings = Vec::new();
    let mut per_source = Vec::with_capacity(sources.len());

    for (index, source) in sources {
        let parsed = parse_source(*index, source.as_ref());
        warnings.extend(parsed.warnings);
        per_source.push(parsed.fixes);
    }

    let fixes = assemble_fixes(per_source, options.sort_by_timestamp);
    let records = derive_records(&fixes);
    let report = compute_statistics(&records, options.sprint_threshold_kmh);

    log::debug!(
        "Analyzed {} sources: {} records, {} warnings",
        sources.len(),
        records.len(),
        warnings.len()
    );

    Analysis {
        records,
        report,
        warnings,
    }
}

/// Decode raw log bytes as UTF-8 text
pub fn decode_nmea_bytes(data: &[u8]) -> std::result::Result<&str, NmeaError> {
    Ok(std::str::from_utf8(data)?)
}

/// Read one NMEA log file into text
pub fn read_nmea_file(file_path: &Path) -> Result<String> {
    let data = std::fs::read(file_path)
        .with_context(|| format!("Failed to read NMEA log: {:?}", file_path))?;
    let text = decode_nmea_bytes(&data)
        .with_context(|| format!("NMEA log is not valid UTF-8: {:?}", file_path))?;
    Ok(text.to_string())
}

/// Read and analyze NMEA log files in the order given
pub fn analyze_nmea_files<P: AsRef<Path>>(
    paths: &[P],
    options: &AnalysisOptions,
) -> Result<Analysis> {
    let sources = paths
        .iter()
        .map(|path| read_nmea_file(path.as_ref()))
        .collect::<Result<Vec<_>>>()?;

    Ok(analyze_sources(&sources, options))
}

/// Like [`analyze_nmea_files`], but fails with [`NmeaError::NoValidData`] when
/// nothing valid was produced
pub fn analyze_nmea_files_strict<P: AsRef<Path>>(
    paths: &[P],
    options: &AnalysisOptions,
) -> Result<Analysis> {
    let analysis = analyze_nmea_files(paths, options)?;
    if !analysis.has_data() {
        return Err(NmeaError::NoValidData.into());
    }
    Ok(analysis)
}

//! Tabular catalog loader.
//!
//! A catalog directory holds one `*.csv` file per pipe type; the file stem is
//! the type code (`DN.csv`, `ALUPEX.csv`, ...). The delimiter is sniffed from
//! the header line. Numeric cells accept a decimal comma, which in a `,`
//! table has to be quoted.

use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use fv_core::Real;
use tracing::debug;

use crate::catalog::{CatalogEntry, CatalogKey, PipeCatalog, PipeTypeTable};
use crate::error::{ScheduleError, ScheduleResult};
use crate::types::{FlowClass, PipeSeries};

const COL_DN: &str = "DN";
const COL_PIPE_TYPE: &str = "PipeType";
const COL_SERIES: &str = "PipeSeries";
const COL_OD: &str = "pOd";
const COL_KOD: &str = "kOd";
const COL_WALL: &str = "tWdth";
const COL_MIN_RADIUS: &str = "minElasticRadii";
const COL_VP_MAX_12: &str = "VpMax12";
const COL_VP_MAX_16: &str = "VpMax16";

/// Load every table in `dir`. Fails if the directory has no tables.
pub fn load_catalog_dir(dir: &Path) -> ScheduleResult<PipeCatalog> {
    let read_err = |source| ScheduleError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files: Vec<PathBuf> = Vec::new();
    for item in std::fs::read_dir(dir).map_err(read_err)? {
        let path = item.map_err(read_err)?.path();
        let is_csv = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv && path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    if files.is_empty() {
        return Err(ScheduleError::NoCatalogTables {
            dir: dir.to_path_buf(),
        });
    }

    let mut tables = Vec::with_capacity(files.len());
    for file in &files {
        let content = std::fs::read_to_string(file).map_err(|source| ScheduleError::Io {
            path: file.clone(),
            source,
        })?;
        let code = file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let table = parse_table(&code, file, &content)?;
        debug!(code = %table.code(), rows = table.len(), "loaded pipe type table");
        tables.push(table);
    }

    Ok(PipeCatalog::from_tables(tables))
}

/// Column positions resolved from the header record.
struct Columns {
    dn: usize,
    pipe_type: usize,
    series: usize,
    od: usize,
    kod: usize,
    wall: Option<usize>,
    min_radius: usize,
    vp_max_12: usize,
    vp_max_16: usize,
}

impl Columns {
    fn resolve(header: &StringRecord, file: &Path) -> ScheduleResult<Self> {
        let find = |name: &'static str| header.iter().position(|h| h.eq_ignore_ascii_case(name));
        let require = |name: &'static str| {
            find(name).ok_or_else(|| ScheduleError::MissingColumn {
                file: file.to_path_buf(),
                column: name,
            })
        };

        Ok(Self {
            dn: require(COL_DN)?,
            pipe_type: require(COL_PIPE_TYPE)?,
            series: require(COL_SERIES)?,
            od: require(COL_OD)?,
            kod: require(COL_KOD)?,
            wall: find(COL_WALL),
            min_radius: require(COL_MIN_RADIUS)?,
            vp_max_12: require(COL_VP_MAX_12)?,
            vp_max_16: require(COL_VP_MAX_16)?,
        })
    }
}

/// Parse one table. `file` is only used for error messages.
///
/// `pOd`, `kOd` and `minElasticRadii` must hold a number. An empty `tWdth`
/// means no wall thickness; empty `VpMax12`/`VpMax16` cells read as 0.
pub fn parse_table(code: &str, file: &Path, content: &str) -> ScheduleResult<PipeTypeTable> {
    let content = content.trim_start_matches('\u{feff}');
    let header_line = content.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    let delimiter = if header_line.contains(';') { b';' } else { b',' };

    let malformed = |source| ScheduleError::Malformed {
        file: file.to_path_buf(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(content.as_bytes());

    let header = reader.headers().map_err(malformed)?.clone();
    if header.iter().all(str::is_empty) {
        return Err(ScheduleError::MissingColumn {
            file: file.to_path_buf(),
            column: COL_DN,
        });
    }
    let cols = Columns::resolve(&header, file)?;

    let mut table = PipeTypeTable::new(code);
    for record in reader.records() {
        let record = record.map_err(malformed)?;
        let line = record
            .position()
            .map_or(0, |p| usize::try_from(p.line()).unwrap_or(usize::MAX));
        let cell = |idx: usize| record.get(idx).unwrap_or("");
        let invalid = |column: &'static str, value: &str| ScheduleError::InvalidValue {
            file: file.to_path_buf(),
            line,
            column,
            value: value.to_string(),
        };
        let real = |idx: usize, column: &'static str| -> ScheduleResult<Real> {
            parse_real(cell(idx)).ok_or_else(|| invalid(column, cell(idx)))
        };
        let real_or_zero = |idx: usize, column: &'static str| -> ScheduleResult<Real> {
            if cell(idx).is_empty() {
                Ok(0.0)
            } else {
                real(idx, column)
            }
        };

        let dn: u32 = cell(cols.dn)
            .parse()
            .map_err(|_| invalid(COL_DN, cell(cols.dn)))?;
        let flow_class = FlowClass::from_catalog(cell(cols.pipe_type))
            .ok_or_else(|| invalid(COL_PIPE_TYPE, cell(cols.pipe_type)))?;
        let series = PipeSeries::from_catalog(cell(cols.series))
            .ok_or_else(|| invalid(COL_SERIES, cell(cols.series)))?;
        let wall_thickness_mm = match cols.wall {
            Some(idx) if !cell(idx).is_empty() => Some(real(idx, COL_WALL)?),
            _ => None,
        };

        let entry = CatalogEntry {
            key: CatalogKey {
                flow_class,
                dn,
                series,
            },
            outer_diameter_mm: real(cols.od, COL_OD)?,
            casing_diameter_mm: real(cols.kod, COL_KOD)?,
            wall_thickness_mm,
            min_elastic_radius_m: real(cols.min_radius, COL_MIN_RADIUS)?,
            vp_max_12_deg: real_or_zero(cols.vp_max_12, COL_VP_MAX_12)?,
            vp_max_16_deg: real_or_zero(cols.vp_max_16, COL_VP_MAX_16)?,
        };

        if table.insert(entry).is_some() {
            return Err(ScheduleError::DuplicateEntry {
                file: file.to_path_buf(),
                line,
                key: entry.key.to_string(),
            });
        }
    }

    Ok(table)
}

// A comma is a decimal separator: it can only reach a cell in `;` tables or
// inside a quoted field.
fn parse_real(cell: &str) -> Option<Real> {
    cell.replace(',', ".")
        .parse::<Real>()
        .ok()
        .filter(|v| v.is_finite())
}

use crate::entity::Entity;
use crate::error::{EngineError, EngineResult};
use crate::factors::Factor;
use crate::fixed::ScoreValue;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

enum Column {
    Id,
    Name,
    Location,
    Score(Factor),
    Ignored,
}

/// Reads entities from CSV with a header row of `id,name,location,<factor...>`.
///
/// Factor columns may use identifiers or display names, in any order. Unknown
/// columns are ignored, empty cells leave the factor absent, and rows that
/// cannot be parsed are skipped with a warning.
pub fn load_entities_csv<R: Read>(reader: R) -> EngineResult<Vec<Entity>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns: Vec<Column> = rdr
        .headers()?
        .iter()
        .map(|h| match h.to_ascii_lowercase().as_str() {
            "id" => Column::Id,
            "name" => Column::Name,
            "location" => Column::Location,
            _ => match Factor::lookup(h) {
                Some(f) => Column::Score(f),
                None => {
                    debug!("Ignoring column '{}'", h);
                    Column::Ignored
                }
            },
        })
        .collect();

    if !columns.iter().any(|c| matches!(c, Column::Id)) {
        return Err(EngineError::Config(
            "entity CSV needs an 'id' column".to_string(),
        ));
    }

    let mut entities = Vec::new();
    for (line, record) in rdr.records().enumerate() {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                warn!("Skipping row {}: {}", line + 2, e);
                continue;
            }
        };
        match parse_row(&columns, &record) {
            Ok(entity) => entities.push(entity),
            Err(reason) => warn!("Skipping row {}: {}", line + 2, reason),
        }
    }

    Ok(entities)
}

fn parse_row(columns: &[Column], record: &csv::StringRecord) -> Result<Entity, String> {
    let mut entity = Entity::new("", "", "");
    for (column, cell) in columns.iter().zip(record.iter()) {
        match column {
            Column::Id => entity.id = cell.to_string(),
            Column::Name => entity.name = cell.to_string(),
            Column::Location => entity.location = cell.to_string(),
            Column::Score(factor) if !cell.is_empty() => {
                let value: f64 = cell
                    .parse()
                    .map_err(|_| format!("'{}' is not a number for {}", cell, factor))?;
                if !value.is_finite() {
                    return Err(format!("non-finite value for {}", factor));
                }
                entity.set_score(*factor, ScoreValue::from_real(value));
            }
            Column::Score(_) | Column::Ignored => {}
        }
    }
    if entity.id.is_empty() {
        return Err("missing id".to_string());
    }
    if entity.name.is_empty() {
        entity.name = entity.id.clone();
    }
    Ok(entity)
}

/// Reads a JSON array of `{ id, name, location, scores: { factor: value } }`.
pub fn load_entities_json<R: Read>(reader: R) -> EngineResult<Vec<Entity>> {
    Ok(serde_json::from_reader(reader)?)
}

/// Loads by extension: `.json` as JSON, anything else as CSV.
pub fn load_entities<P: AsRef<Path>>(path: P) -> EngineResult<Vec<Entity>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let entities = if is_json {
        load_entities_json(file)?
    } else {
        load_entities_csv(file)?
    };
    info!("Loaded {} entities from {}", entities.len(), path.display());
    Ok(entities)
}

use crate::client::{RawDetailRecord, RawSprites};
use crate::entity::{Entity, Stat};
use crate::error::CatalogError;

/// Map one raw detail record into the canonical [`Entity`].
///
/// Fails with [`CatalogError::MalformedRecord`] when the id, name, types or
/// stats are missing. Missing artwork is not a failure.
pub fn normalize(record: RawDetailRecord) -> Result<Entity, CatalogError> {
    let label = record
        .name
        .clone()
        .or_else(|| record.id.map(|id| format!("#{id}")))
        .unwrap_or_else(|| "<unnamed>".to_string());

    let id = match record.id {
        Some(0) => return Err(CatalogError::malformed(label, "id must be positive")),
        Some(id) => id,
        None => return Err(CatalogError::malformed(label, "missing id")),
    };
    let Some(raw_name) = record.name.as_deref() else {
        return Err(CatalogError::malformed(label, "missing name"));
    };
    let Some(raw_stats) = record.stats else {
        return Err(CatalogError::malformed(label, "missing stats"));
    };

    let types = record
        .types
        .unwrap_or_default()
        .into_iter()
        .map(|slot| slot.type_info.and_then(|info| info.name))
        .collect::<Option<Vec<String>>>()
        .ok_or_else(|| CatalogError::malformed(&label, "type entry without a name"))?;
    if types.is_empty() {
        return Err(CatalogError::malformed(label, "no types"));
    }

    let stats = raw_stats
        .into_iter()
        .map(|slot| {
            let name = slot.stat.and_then(|stat| stat.name)?;
            let value = slot.base_stat?;
            Some(Stat { name, value })
        })
        .collect::<Option<Vec<Stat>>>()
        .ok_or_else(|| CatalogError::malformed(&label, "incomplete stat entry"))?;

    Ok(Entity {
        id,
        name: capitalize_first(raw_name),
        image_url: preferred_image(record.sprites.as_ref()),
        types,
        height: record.height.unwrap_or_default(),
        weight: record.weight.unwrap_or_default(),
        stats,
    })
}

/// Official artwork first, then the default front sprite, then nothing.
pub fn preferred_image(sprites: Option<&RawSprites>) -> String {
    let Some(sprites) = sprites else {
        return String::new();
    };
    let artwork = sprites
        .other
        .as_ref()
        .and_then(|other| other.official_artwork.as_ref())
        .and_then(|art| art.front_default.as_deref())
        .filter(|url| !url.is_empty());
    let sprite = sprites.front_default.as_deref().filter(|url| !url.is_empty());
    artwork.or(sprite).unwrap_or_default().to_string()
}

pub fn capitalize_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

use std::{
    collections::BTreeMap,
    fs::File,
    io::{self, BufWriter, Write as _},
    path::Path,
};

use anyhow::Context;
use arena_engine::{Catalog, CharacterId, CharacterTemplate, MoveDefinition, MoveId};

/// Writes `value` as a single line of JSON to `path`, replacing the file.
pub fn save_json_file<T, P>(file_kind: &str, value: &T, path: P) -> anyhow::Result<()>
where
    T: serde::Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("Failed to create {} file: {}", file_kind, path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, value)
        .with_context(|| format!("Failed to write {} JSON to {}", file_kind, path.display()))?;
    writeln!(writer)
        .and_then(|()| writer.flush())
        .with_context(|| format!("Failed to flush {} file: {}", file_kind, path.display()))?;
    Ok(())
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Loads and validates the move and character catalogs.
pub fn read_catalog<P, Q>(moves_path: P, characters_path: Q) -> anyhow::Result<Catalog>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let moves: BTreeMap<MoveId, MoveDefinition> = read_json_file("move catalog", &moves_path)?;
    let characters: BTreeMap<CharacterId, CharacterTemplate> =
        read_json_file("character catalog", &characters_path)?;
    let catalog = Catalog::new(moves, characters).with_context(|| {
        format!(
            "Invalid catalog: {} / {}",
            moves_path.as_ref().display(),
            characters_path.as_ref().display()
        )
    })?;
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use arena_engine::EncounterTable;

    use super::*;

    fn data_path(name: &str) -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../data")
            .join(name)
    }

    #[test]
    fn test_sample_catalog_covers_default_encounters() {
        let catalog = read_catalog(data_path("moves.json"), data_path("characters.json")).unwrap();
        let table = EncounterTable::default();
        for id in std::iter::once(table.hero).chain(table.foes).chain(table.boss) {
            let template = catalog.character(id).unwrap();
            // everyone can fall back on an attack
            assert!(
                template
                    .movelist
                    .iter()
                    .any(|m| !catalog.move_def(*m).target.is_self_target())
            );
        }
        let hero = catalog.character(table.hero).unwrap();
        assert!(hero.movelist.iter().any(|m| catalog.move_def(*m).is_self_heal()));
    }

    #[test]
    fn test_genome_file_round_trip() {
        let path = std::env::temp_dir().join(format!("arena-genome-{}.json", std::process::id()));
        save_json_file("genome", &[0.5_f32, -1.0], &path).unwrap();
        let loaded: Vec<f32> = read_json_file("genome", &path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, [0.5, -1.0]);
    }

    #[test]
    fn test_missing_file_names_the_path() {
        let err = read_json_file::<Vec<f32>, _>("genome", data_path("missing.json")).unwrap_err();
        assert!(err.to_string().contains("missing.json"));
    }
}

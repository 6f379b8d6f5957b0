//! Текст секторов
//!
//! Поиск всегда возвращает заголовок и описание: если таблица не знает
//! сектор, заголовок строится по шаблону, а описание берётся из заглушки.

use crate::{ContentStrategy, DiagramConfig, SectorContent, SectorId};

/// Заголовок и описание сектора. Функция тотальна и детерминирована.
pub fn lookup(config: &DiagramConfig, id: &SectorId) -> SectorContent {
    let content = &config.content;
    let templated = SectorContent {
        title: fill(config, &content.title_template, id),
        description: fill(config, &content.description_template, id),
    };

    let resolved = match content.strategy {
        ContentStrategy::Templated => templated.clone(),
        ContentStrategy::Table => content
            .table
            .get(&id.key())
            .or_else(|| content.table.get(&id.face_key()))
            .cloned()
            .unwrap_or_else(|| SectorContent {
                title: templated.title.clone(),
                description: content.placeholder.clone(),
            }),
    };

    SectorContent {
        title: non_empty(resolved.title, || fallback_title(config, id)),
        description: non_empty(resolved.description, || {
            non_empty(content.placeholder.clone(), || {
                non_empty(templated.description.clone(), || fallback_description(config, id))
            })
        }),
    }
}

fn fill(config: &DiagramConfig, template: &str, id: &SectorId) -> String {
    template
        .replace("{block}", &config.block_name(id.block))
        .replace("{face}", &config.face_title(id.face))
        .replace("{cell}", &config.cell_label(id.row, id.col))
}

fn fallback_title(config: &DiagramConfig, id: &SectorId) -> String {
    format!(
        "{} — {} ({})",
        config.block_name(id.block),
        config.face_title(id.face),
        config.cell_label(id.row, id.col)
    )
}

fn fallback_description(config: &DiagramConfig, id: &SectorId) -> String {
    format!(
        "Сектор {} грани «{}» блока «{}».",
        config.cell_label(id.row, id.col),
        config.face_title(id.face),
        config.block_name(id.block)
    )
}

fn non_empty(value: String, fallback: impl FnOnce() -> String) -> String {
    if value.trim().is_empty() {
        fallback()
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FaceKey, PrismShape};

    fn abcd() -> DiagramConfig {
        DiagramConfig::with_blocks(&["A", "B", "C", "D"])
    }

    #[test]
    fn test_templated_title_names_block_face_and_cell() {
        let config = abcd();
        let content = lookup(&config, &SectorId::new(2, FaceKey::Left, 1, 0));
        assert!(content.title.contains('C'));
        assert!(content.title.contains("Левая грань"));
        assert!(content.title.contains("B1"));
        assert!(!content.description.is_empty());
    }

    #[test]
    fn test_lookup_is_deterministic() {
        let config = abcd();
        let id = SectorId::new(0, FaceKey::Base, 2, 2);
        assert_eq!(lookup(&config, &id), lookup(&config, &id));
    }

    #[test]
    fn test_table_prefers_exact_key_then_face_key() {
        let mut config = abcd();
        config.content.strategy = ContentStrategy::Table;
        config.content.table.insert(
            "prism1_right".into(),
            SectorContent {
                title: "Правая".into(),
                description: "общая для грани".into(),
            },
        );
        config.content.table.insert(
            "prism1_right_0_0".into(),
            SectorContent {
                title: "Угол".into(),
                description: "точная ячейка".into(),
            },
        );

        let exact = lookup(&config, &SectorId::new(1, FaceKey::Right, 0, 0));
        assert_eq!(exact.title, "Угол");
        let face = lookup(&config, &SectorId::new(1, FaceKey::Right, 2, 1));
        assert_eq!(face.description, "общая для грани");
    }

    #[test]
    fn test_table_miss_uses_placeholder() {
        let mut config = abcd();
        config.content.strategy = ContentStrategy::Table;
        let content = lookup(&config, &SectorId::new(3, FaceKey::Base, 0, 1));
        assert!(content.title.contains('D'));
        assert!(content.title.contains("A2"));
        assert_eq!(content.description, config.content.placeholder);
    }

    #[test]
    fn test_empty_entries_never_produce_empty_text() {
        let mut config = abcd();
        config.content.strategy = ContentStrategy::Table;
        config.content.placeholder.clear();
        config
            .content
            .table
            .insert("prism0_left_0_0".into(), SectorContent::default());
        let content = lookup(&config, &SectorId::new(0, FaceKey::Left, 0, 0));
        assert!(!content.title.is_empty());
        assert!(!content.description.is_empty());
    }

    #[test]
    fn test_out_of_range_block_uses_generic_name() {
        let config = abcd();
        let content = lookup(&config, &SectorId::new(9, FaceKey::Base, 0, 0));
        assert!(content.title.contains("Блок 10"));
    }

    fn assert_all_sectors_have_text(config: &DiagramConfig) {
        let ids = config.sector_ids();
        assert!(!ids.is_empty());
        for id in ids {
            let content = lookup(config, &id);
            assert!(!content.title.trim().is_empty(), "{}", id.key());
            assert!(!content.description.trim().is_empty(), "{}", id.key());
        }
    }

    #[test]
    fn test_empty_templates_and_placeholder_still_give_description() {
        let config = DiagramConfig::from_json(
            r#"{"content": {"description_template": "", "placeholder": ""}}"#,
        )
        .unwrap();
        let content = lookup(&config, &SectorId::new(0, FaceKey::Base, 0, 0));
        assert!(!content.description.is_empty());
        assert!(content.description.contains("A1"));
        assert_all_sectors_have_text(&config);
    }

    #[test]
    fn test_every_sector_has_title_and_description() {
        for shape in [PrismShape::Triangular, PrismShape::Box] {
            let mut config = abcd();
            config.shape = shape;
            assert_all_sectors_have_text(&config);

            config.content.title_template.clear();
            config.content.description_template.clear();
            config.content.placeholder.clear();
            assert_all_sectors_have_text(&config);

            // пустая таблица
            config.content.strategy = ContentStrategy::Table;
            assert_all_sectors_have_text(&config);

            // частичная таблица с пустыми записями
            let face = shape.face_keys()[0];
            config.content.table.insert(
                SectorId::new(0, face, 0, 0).key(),
                SectorContent {
                    title: "Ячейка".into(),
                    description: "Описание".into(),
                },
            );
            config
                .content
                .table
                .insert(SectorId::new(1, face, 0, 0).face_key(), SectorContent::default());
            config.content.table.insert(
                SectorId::new(2, face, 1, 1).key(),
                SectorContent {
                    title: " ".into(),
                    description: String::new(),
                },
            );
            assert_all_sectors_have_text(&config);
            assert_eq!(
                lookup(&config, &SectorId::new(0, face, 0, 0)).title,
                "Ячейка"
            );
        }
    }
}

//! Конфигурация диаграммы: блоки, сетка, размеры, грани и контент

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::layout::GridLayout;
use crate::{FaceKey, PrismShape, SectorContent, SectorId};

/// Допуск при проверке вместимости сетки
const FIT_EPSILON: f32 = 1e-4;

/// Ошибки конфигурации
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("diagram has no blocks")]
    NoBlocks,
    #[error("grid must have at least one row and one column (got {rows}x{cols})")]
    EmptyGrid { rows: usize, cols: usize },
    #[error("expected {expected} {axis} labels, got {actual}")]
    LabelCount {
        axis: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f32 },
    #[error("grid needs {required:.3} units of face height but only {available:.3} are available")]
    GridOverflow { required: f32, available: f32 },
    #[error("invalid diagram JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Размер сетки и подписи строк/столбцов
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSpec {
    pub rows: usize,
    pub cols: usize,
    pub row_labels: Vec<String>,
    pub column_labels: Vec<String>,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            rows: 3,
            cols: 3,
            row_labels: ["A", "B", "C"].iter().map(|s| s.to_string()).collect(),
            column_labels: ["1", "2", "3"].iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Геометрические константы (в единицах сцены)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dimensions {
    /// Длина стороны сечения (ширина грани)
    pub base_length: f32,
    /// Высота блока
    pub block_height: f32,
    /// Зазор между соседними блоками
    pub block_spacing: f32,
    /// Зазор между кнопками
    pub button_gap: f32,
    /// Отступ сетки от краёв грани
    pub margin: f32,
    /// Толщина кнопки
    pub button_depth: f32,
    pub axis_radius: f32,
    /// На сколько ось длиннее стопки блоков
    pub axis_padding: f32,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            base_length: 3.6,
            block_height: 3.6,
            block_spacing: 0.8,
            button_gap: 0.14,
            margin: 0.2,
            button_depth: 0.22,
            axis_radius: 0.16,
            axis_padding: 1.2,
        }
    }
}

/// Название и цвет грани
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceStyle {
    pub key: FaceKey,
    pub title: String,
    pub color: [u8; 3],
}

impl FaceStyle {
    fn new(key: FaceKey, title: &str, color: u32) -> Self {
        Self {
            key,
            title: title.to_string(),
            color: [(color >> 16) as u8, (color >> 8) as u8, color as u8],
        }
    }
}

/// Способ получения текста сектора
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentStrategy {
    /// Текст генерируется по шаблонам
    #[default]
    Templated,
    /// Текст берётся из таблицы, для остальных секторов используется заглушка
    Table,
}

/// Шаблоны и таблица контента
///
/// Шаблоны поддерживают подстановки `{block}`, `{face}` и `{cell}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    pub strategy: ContentStrategy,
    pub title_template: String,
    pub description_template: String,
    /// Описание для секторов, отсутствующих в таблице
    pub placeholder: String,
    /// Ключи: `prism{block}_{face}` или `prism{block}_{face}_{row}_{col}`
    pub table: BTreeMap<String, SectorContent>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            strategy: ContentStrategy::Templated,
            title_template: "{block} — {face} ({cell})".to_string(),
            description_template: "Описание для сектора {cell} на грани \"{face}\" блока \"{block}\". \
                Здесь можно разместить детализированную информацию о соответствующем направлении развития."
                .to_string(),
            placeholder: "Материалы для этого сектора готовятся.".to_string(),
            table: BTreeMap::new(),
        }
    }
}

/// Полное описание диаграммы
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramConfig {
    /// Названия блоков снизу вверх
    pub blocks: Vec<String>,
    pub shape: PrismShape,
    pub grid: GridSpec,
    pub dimensions: Dimensions,
    pub faces: Vec<FaceStyle>,
    pub content: ContentConfig,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            blocks: [
                "Самопроектирование",
                "Самореализация",
                "Идентификация",
                "Адаптация",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            shape: PrismShape::Triangular,
            grid: GridSpec::default(),
            dimensions: Dimensions::default(),
            faces: vec![
                FaceStyle::new(FaceKey::Base, "Основание", 0xff6b6b),
                FaceStyle::new(FaceKey::Right, "Правая грань", 0x4ecdc4),
                FaceStyle::new(FaceKey::Left, "Левая грань", 0x5c7cfa),
                FaceStyle::new(FaceKey::Front, "Передняя грань", 0xffa94d),
                FaceStyle::new(FaceKey::Back, "Задняя грань", 0x94d82d),
            ],
            content: ContentConfig::default(),
        }
    }
}

impl DiagramConfig {
    /// Разобрать и проверить конфигурацию из JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: DiagramConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Конфигурация с заданными именами блоков, остальное по умолчанию
    pub fn with_blocks<S: AsRef<str>>(names: &[S]) -> Self {
        Self {
            blocks: names.iter().map(|s| s.as_ref().to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Название блока; для несуществующего индекса возвращается «Блок N»
    pub fn block_name(&self, index: usize) -> String {
        match self.blocks.get(index) {
            Some(name) if !name.trim().is_empty() => name.clone(),
            _ => format!("Блок {}", index + 1),
        }
    }

    pub fn face_style(&self, key: FaceKey) -> Option<&FaceStyle> {
        self.faces.iter().find(|f| f.key == key)
    }

    /// Отображаемое название грани
    pub fn face_title(&self, key: FaceKey) -> String {
        match self.face_style(key) {
            Some(style) if !style.title.trim().is_empty() => style.title.clone(),
            _ => key.as_str().to_string(),
        }
    }

    pub fn face_color(&self, key: FaceKey) -> [u8; 3] {
        self.face_style(key)
            .map(|f| f.color)
            .unwrap_or([160, 160, 170])
    }

    pub fn row_label(&self, row: usize) -> String {
        self.grid
            .row_labels
            .get(row)
            .cloned()
            .unwrap_or_else(|| format!("R{}", row + 1))
    }

    pub fn column_label(&self, col: usize) -> String {
        self.grid
            .column_labels
            .get(col)
            .cloned()
            .unwrap_or_else(|| (col + 1).to_string())
    }

    /// Подпись ячейки, например `B1`
    pub fn cell_label(&self, row: usize, col: usize) -> String {
        format!("{}{}", self.row_label(row), self.column_label(col))
    }

    /// Раскладка сетки, общая для всех граней
    pub fn grid_layout(&self) -> GridLayout {
        let d = &self.dimensions;
        GridLayout::new(
            d.base_length,
            d.block_height,
            self.grid.rows,
            self.grid.cols,
            d.margin,
            d.button_gap,
        )
    }

    /// Все допустимые идентификаторы секторов
    pub fn sector_ids(&self) -> Vec<SectorId> {
        let faces = self.shape.face_keys();
        let mut ids =
            Vec::with_capacity(self.blocks.len() * faces.len() * self.grid.rows * self.grid.cols);
        for block in 0..self.blocks.len() {
            for &face in faces {
                for row in 0..self.grid.rows {
                    for col in 0..self.grid.cols {
                        ids.push(SectorId::new(block, face, row, col));
                    }
                }
            }
        }
        ids
    }

    /// Принадлежит ли идентификатор множеству допустимых секторов
    pub fn contains(&self, id: &SectorId) -> bool {
        id.block < self.blocks.len()
            && self.shape.face_keys().contains(&id.face)
            && id.row < self.grid.rows
            && id.col < self.grid.cols
    }

    /// Проверить согласованность конфигурации
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.blocks.is_empty() {
            return Err(ConfigError::NoBlocks);
        }
        let grid = &self.grid;
        if grid.rows == 0 || grid.cols == 0 {
            return Err(ConfigError::EmptyGrid {
                rows: grid.rows,
                cols: grid.cols,
            });
        }
        if grid.row_labels.len() != grid.rows {
            return Err(ConfigError::LabelCount {
                axis: "row",
                expected: grid.rows,
                actual: grid.row_labels.len(),
            });
        }
        if grid.column_labels.len() != grid.cols {
            return Err(ConfigError::LabelCount {
                axis: "column",
                expected: grid.cols,
                actual: grid.column_labels.len(),
            });
        }

        let d = &self.dimensions;
        for (field, value) in [
            ("base_length", d.base_length),
            ("block_height", d.block_height),
            ("button_depth", d.button_depth),
            ("axis_radius", d.axis_radius),
        ] {
            if value <= 0.0 || !value.is_finite() {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        for (field, value) in [
            ("block_spacing", d.block_spacing),
            ("button_gap", d.button_gap),
            ("margin", d.margin),
            ("axis_padding", d.axis_padding),
        ] {
            if value < 0.0 || !value.is_finite() {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        let layout = self.grid_layout();
        if layout.button_size <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "button_size",
                value: layout.button_size,
            });
        }
        let required = layout.required_height();
        if required > d.block_height + FIT_EPSILON {
            return Err(ConfigError::GridOverflow {
                required,
                available: d.block_height,
            });
        }
        Ok(())
    }
}

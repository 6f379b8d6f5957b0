use serde::{Deserialize, Serialize};

pub mod config;
pub mod content;
pub mod geometry;
pub mod layout;
pub mod picking;
pub mod scene;

pub use config::{
    ConfigError, ContentConfig, ContentStrategy, Dimensions, DiagramConfig, FaceStyle, GridSpec,
};
pub use content::lookup;
pub use scene::{build_scene, LabelRole, NodeId, NodeKind, SceneGraph};

/// Ключ грани блока
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaceKey {
    Base,
    Right,
    Left,
    Front,
    Back,
}

impl FaceKey {
    /// Строковый ключ, используемый в идентификаторах секторов
    pub fn as_str(&self) -> &'static str {
        match self {
            FaceKey::Base => "base",
            FaceKey::Right => "right",
            FaceKey::Left => "left",
            FaceKey::Front => "front",
            FaceKey::Back => "back",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "base" => Some(FaceKey::Base),
            "right" => Some(FaceKey::Right),
            "left" => Some(FaceKey::Left),
            "front" => Some(FaceKey::Front),
            "back" => Some(FaceKey::Back),
            _ => None,
        }
    }
}

impl std::fmt::Display for FaceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Форма поперечного сечения блока
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrismShape {
    /// Трёхгранная призма: основание, правая и левая грани
    #[default]
    Triangular,
    /// Прямоугольный блок: передняя, правая, задняя и левая грани
    Box,
}

impl PrismShape {
    /// Грани в порядке обхода сечения
    pub fn face_keys(&self) -> &'static [FaceKey] {
        match self {
            PrismShape::Triangular => &[FaceKey::Base, FaceKey::Right, FaceKey::Left],
            PrismShape::Box => &[FaceKey::Front, FaceKey::Right, FaceKey::Back, FaceKey::Left],
        }
    }
}

/// Идентификатор сектора: (блок, грань, строка, столбец)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SectorId {
    pub block: usize,
    pub face: FaceKey,
    pub row: usize,
    pub col: usize,
}

impl SectorId {
    pub fn new(block: usize, face: FaceKey, row: usize, col: usize) -> Self {
        Self { block, face, row, col }
    }

    /// Полный ключ сектора, например `prism2_left_1_0`
    pub fn key(&self) -> String {
        format!("prism{}_{}_{}_{}", self.block, self.face, self.row, self.col)
    }

    /// Ключ пары (блок, грань), например `prism2_left`
    pub fn face_key(&self) -> String {
        format!("prism{}_{}", self.block, self.face)
    }
}

/// Заголовок и описание сектора
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SectorContent {
    pub title: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sector_keys() {
        let id = SectorId::new(2, FaceKey::Left, 1, 0);
        assert_eq!(id.key(), "prism2_left_1_0");
        assert_eq!(id.face_key(), "prism2_left");
    }

    #[test]
    fn test_face_key_serde() {
        let json = serde_json::to_string(&FaceKey::Right).unwrap();
        assert_eq!(json, r#""right""#);
        let back: FaceKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, FaceKey::Right);
    }

    #[test]
    fn test_face_key_parse_matches_as_str() {
        for key in [FaceKey::Base, FaceKey::Right, FaceKey::Left, FaceKey::Front, FaceKey::Back] {
            assert_eq!(FaceKey::parse(key.as_str()), Some(key));
        }
        assert_eq!(FaceKey::parse("top"), None);
    }

    #[test]
    fn test_shape_face_order() {
        assert_eq!(
            PrismShape::Triangular.face_keys(),
            &[FaceKey::Base, FaceKey::Right, FaceKey::Left]
        );
        assert_eq!(PrismShape::Box.face_keys().len(), 4);
    }
}

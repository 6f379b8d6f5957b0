use serde::Serialize;
use wasm_bindgen::prelude::*;

use glam::{Mat4, Vec2};
use shared::picking::{resolve_click, Clickable, ViewportRect};
use shared::{build_scene, lookup, DiagramConfig, FaceKey, NodeKind, SceneGraph, SectorId};

/// Узел сцены в виде, удобном для three.js: мировая матрица по столбцам
#[derive(Serialize)]
struct NodeJson {
    id: u32,
    parent: Option<u32>,
    kind: &'static str,
    /// Ключ сектора для кнопок, имя блока, текст подписи
    name: String,
    matrix: [f32; 16],
    /// Ширина и высота грани или кнопки
    size: [f32; 2],
    color: Option<[u8; 3]>,
}

/// Диаграмма для браузера: сцена строится здесь, отрисовка остаётся за JS.
#[wasm_bindgen]
pub struct PrismDiagram {
    config: DiagramConfig,
    graph: SceneGraph,
    clickables: Vec<Clickable>,
}

impl PrismDiagram {
    fn from_config(config: DiagramConfig) -> Self {
        let graph = build_scene(&config);
        let clickables = graph.clickables();
        Self {
            config,
            graph,
            clickables,
        }
    }

    fn parse(config_json: Option<&str>) -> Result<Self, String> {
        let config = match config_json {
            Some(json) => DiagramConfig::from_json(json).map_err(|e| e.to_string())?,
            None => DiagramConfig::default(),
        };
        Ok(Self::from_config(config))
    }

    fn nodes(&self) -> Vec<NodeJson> {
        self.graph
            .iter()
            .map(|(id, node)| {
                let matrix = Mat4::from(self.graph.world_transform(id)).to_cols_array();
                let parent = self.graph.parent(id).map(|p| p.index() as u32);
                let (kind, name, size, color) = match &node.kind {
                    NodeKind::Block { name, .. } => ("block", name.clone(), [0.0, 0.0], None),
                    NodeKind::Face {
                        key,
                        width,
                        height,
                        color,
                        ..
                    } => ("face", key.to_string(), [*width, *height], Some(*color)),
                    NodeKind::Button {
                        sector, size, color, ..
                    } => ("button", sector.key(), [*size, *size], Some(*color)),
                    NodeKind::Label { text, .. } => ("label", text.clone(), [0.0, 0.0], None),
                    NodeKind::Axis { radius, height } => {
                        ("axis", String::new(), [*radius, *height], None)
                    }
                };
                NodeJson {
                    id: id.index() as u32,
                    parent,
                    kind,
                    name,
                    matrix,
                    size,
                    color,
                }
            })
            .collect()
    }

    fn pick(
        &self,
        client: Vec2,
        rect: ViewportRect,
        view_projection: &[f32],
    ) -> Result<Option<SectorId>, String> {
        if view_projection.len() != 16 {
            return Err(format!(
                "view-projection must have 16 elements, got {}",
                view_projection.len()
            ));
        }
        let vp = Mat4::from_cols_slice(view_projection);
        Ok(resolve_click(client, &rect, &vp, &self.clickables).map(|hit| hit.sector))
    }

    fn sector(&self, block: usize, face: &str, row: usize, col: usize) -> Result<SectorId, String> {
        let face = FaceKey::parse(face).ok_or_else(|| format!("Unknown face '{face}'"))?;
        let id = SectorId::new(block, face, row, col);
        if !self.config.contains(&id) {
            return Err(format!("Sector {} is not part of the diagram", id.key()));
        }
        Ok(id)
    }
}

#[wasm_bindgen]
impl PrismDiagram {
    /// Диаграмма из JSON-конфигурации или встроенная, если `None`
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<PrismDiagram, JsError> {
        Self::parse(config_json.as_deref()).map_err(|e| JsError::new(&e))
    }

    /// Все узлы сцены с мировыми матрицами
    #[wasm_bindgen(js_name = sceneJson)]
    pub fn scene_json(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.nodes()).map_err(|e| JsError::new(&e.to_string()))
    }

    #[wasm_bindgen(js_name = blockNames)]
    pub fn block_names(&self) -> Vec<String> {
        (0..self.config.block_count())
            .map(|i| self.config.block_name(i))
            .collect()
    }

    /// Ключ сектора под курсором или `undefined`.
    ///
    /// `left`/`top`/`width`/`height` — прямоугольник canvas из
    /// `getBoundingClientRect()`, `view_projection` — матрица камеры по столбцам.
    #[wasm_bindgen(js_name = resolveClick)]
    #[allow(clippy::too_many_arguments)]
    pub fn resolve_click(
        &self,
        client_x: f32,
        client_y: f32,
        left: f32,
        top: f32,
        width: f32,
        height: f32,
        view_projection: &[f32],
    ) -> Result<Option<String>, JsError> {
        let rect = ViewportRect::new(left, top, width, height);
        let hit = self
            .pick(Vec2::new(client_x, client_y), rect, view_projection)
            .map_err(|e| JsError::new(&e))?;
        if let Some(id) = &hit {
            web_sys::console::debug_1(&JsValue::from_str(&id.key()));
        }
        Ok(hit.map(|id| id.key()))
    }

    /// Заголовок и описание сектора в JSON
    pub fn content(&self, block: usize, face: &str, row: usize, col: usize) -> Result<String, JsError> {
        let id = self
            .sector(block, face, row, col)
            .map_err(|e| JsError::new(&e))?;
        serde_json::to_string(&lookup(&self.config, &id)).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Ключи всех секторов, как массив JS-строк
    #[wasm_bindgen(js_name = sectorKeys)]
    pub fn sector_keys(&self) -> js_sys::Array {
        self.config
            .sector_ids()
            .iter()
            .map(|id| JsValue::from_str(&id.key()))
            .collect()
    }
}

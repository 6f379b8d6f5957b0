//! Раскладка сетки кнопок на грани
//!
//! Все позиции задаются в локальной 2D-системе грани: ось X идёт вдоль
//! ширины от начальной вершины к конечной, ось Y направлена вверх, начало
//! координат в центре грани. Переход в мировые координаты выполняет
//! трансформация узла грани.

use glam::Vec2;

/// Параметры сетки одной грани
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub rows: usize,
    pub cols: usize,
    pub face_width: f32,
    pub face_height: f32,
    pub margin: f32,
    pub gap: f32,
    /// Сторона квадратной кнопки
    pub button_size: f32,
}

impl GridLayout {
    /// Размер кнопки подбирается так, что
    /// `2 * margin + size * cols + gap * (cols - 1) == face_width`.
    pub fn new(
        face_width: f32,
        face_height: f32,
        rows: usize,
        cols: usize,
        margin: f32,
        gap: f32,
    ) -> Self {
        let cols_f = cols.max(1) as f32;
        let available = face_width - margin * 2.0;
        let button_size = (available - gap * (cols_f - 1.0)) / cols_f;
        Self {
            rows,
            cols,
            face_width,
            face_height,
            margin,
            gap,
            button_size,
        }
    }

    /// Шаг между центрами соседних кнопок
    pub fn pitch(&self) -> f32 {
        self.button_size + self.gap
    }

    /// Ширина, занятая сеткой вместе с отступами
    pub fn required_width(&self) -> f32 {
        self.span(self.cols)
    }

    /// Высота, занятая сеткой вместе с отступами
    pub fn required_height(&self) -> f32 {
        self.span(self.rows)
    }

    fn span(&self, count: usize) -> f32 {
        let n = count as f32;
        self.margin * 2.0 + self.button_size * n + self.gap * (n - 1.0).max(0.0)
    }

    /// Центр кнопки (row, col); строка 0 сверху, столбец 0 у начальной вершины
    pub fn button_center(&self, row: usize, col: usize) -> Vec2 {
        let half = self.button_size / 2.0;
        Vec2::new(
            -self.face_width / 2.0 + self.margin + half + col as f32 * self.pitch(),
            self.face_height / 2.0 - self.margin - half - row as f32 * self.pitch(),
        )
    }

    /// Границы ячейки (min, max)
    pub fn cell_bounds(&self, row: usize, col: usize) -> (Vec2, Vec2) {
        let center = self.button_center(row, col);
        let half = Vec2::splat(self.button_size / 2.0);
        (center - half, center + half)
    }

    /// Позиция подписи строки в левом поле грани
    pub fn row_label(&self, row: usize) -> Vec2 {
        Vec2::new(
            -self.face_width / 2.0 + self.margin / 2.0,
            self.button_center(row, 0).y,
        )
    }

    /// Позиция подписи столбца в верхнем поле грани
    pub fn column_label(&self, col: usize) -> Vec2 {
        Vec2::new(
            self.button_center(0, col).x,
            self.face_height / 2.0 - self.margin / 2.0,
        )
    }

    /// Помещаются ли все ячейки в границы грани
    pub fn fits(&self) -> bool {
        const EPS: f32 = 1e-4;
        if self.button_size <= 0.0 {
            return false;
        }
        let half_w = self.face_width / 2.0 + EPS;
        let half_h = self.face_height / 2.0 + EPS;
        (0..self.rows).all(|row| {
            (0..self.cols).all(|col| {
                let (min, max) = self.cell_bounds(row, col);
                min.x >= -half_w && max.x <= half_w && min.y >= -half_h && max.y <= half_h
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn default_layout() -> GridLayout {
        GridLayout::new(3.6, 3.6, 3, 3, 0.2, 0.14)
    }

    #[test]
    fn test_button_size_fills_face_width() {
        let layout = default_layout();
        assert!((layout.required_width() - layout.face_width).abs() < EPS);
        assert!((layout.button_size - (3.6 - 0.4 - 0.28) / 3.0).abs() < EPS);
    }

    #[test]
    fn test_adjacent_buttons_differ_by_pitch() {
        let layout = default_layout();
        for row in 0..layout.rows {
            for col in 0..layout.cols {
                let here = layout.button_center(row, col);
                if col + 1 < layout.cols {
                    let right = layout.button_center(row, col + 1);
                    assert!((right.x - here.x - layout.pitch()).abs() < EPS);
                    assert!((right.y - here.y).abs() < EPS);
                }
                if row + 1 < layout.rows {
                    let below = layout.button_center(row + 1, col);
                    assert!((here.y - below.y - layout.pitch()).abs() < EPS);
                    assert!((below.x - here.x).abs() < EPS);
                }
            }
        }
    }

    #[test]
    fn test_cells_fit_and_do_not_overlap() {
        let layout = default_layout();
        assert!(layout.fits());
        let cells: Vec<_> = (0..3)
            .flat_map(|r| (0..3).map(move |c| (r, c)))
            .map(|(r, c)| layout.cell_bounds(r, c))
            .collect();
        for (i, a) in cells.iter().enumerate() {
            for b in cells.iter().skip(i + 1) {
                let overlap_x = a.0.x < b.1.x - EPS && b.0.x < a.1.x - EPS;
                let overlap_y = a.0.y < b.1.y - EPS && b.0.y < a.1.y - EPS;
                assert!(!(overlap_x && overlap_y), "cells {a:?} and {b:?} overlap");
            }
        }
    }

    #[test]
    fn test_short_face_does_not_fit() {
        let layout = GridLayout::new(3.6, 2.6, 3, 3, 0.2, 0.14);
        assert!(!layout.fits());
    }

    #[test]
    fn test_label_ordering() {
        let layout = default_layout();
        // строка 0 у верхнего края, столбец 0 у начальной вершины
        assert!(layout.row_label(0).y > layout.row_label(1).y);
        assert!(layout.row_label(1).y > layout.row_label(2).y);
        assert!(layout.column_label(0).x < layout.column_label(1).x);
        assert!(layout.column_label(0).y > layout.button_center(0, 0).y);
        assert!(layout.row_label(0).x < layout.button_center(0, 0).x);
        assert!((layout.row_label(1).y - layout.button_center(1, 2).y).abs() < EPS);
    }
}

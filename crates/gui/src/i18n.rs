use std::sync::atomic::{AtomicU8, Ordering};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lang {
    Ru,
    En,
}

impl Lang {
    /// Parse a settings code ("ru", "en"); unknown codes fall back to Russian
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Lang::En,
            _ => Lang::Ru,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Lang::Ru => "ru",
            Lang::En => "en",
        }
    }
}

static CURRENT_LANG: AtomicU8 = AtomicU8::new(0); // 0=Ru (default)

pub fn lang() -> Lang {
    match CURRENT_LANG.load(Ordering::Relaxed) {
        1 => Lang::En,
        _ => Lang::Ru,
    }
}

pub fn set_lang(l: Lang) {
    CURRENT_LANG.store(
        match l {
            Lang::Ru => 0,
            Lang::En => 1,
        },
        Ordering::Relaxed,
    );
}

/// Translate a key to the current language.
pub fn t(key: &str) -> &'static str {
    tr(lang(), key)
}

/// Translate a key to the given language.
pub fn tr(lang: Lang, key: &str) -> &'static str {
    let ru = lang == Lang::Ru;
    match key {
        // ── Window ──────────────────────────────────────────
        "app.title" => if ru { "Призматическая диаграмма" } else { "Prism diagram" },

        // ── Header ──────────────────────────────────────────
        "header.title" => if ru {
            "Инклюзивная трансформация образовательной экосреды университета"
        } else {
            "Inclusive transformation of the university educational ecosystem"
        },
        "header.subtitle" => if ru {
            "На основе принципов универсального дизайна"
        } else {
            "Based on the principles of universal design"
        },

        // ── Instructions ────────────────────────────────────
        "instructions.click" => if ru {
            "🎯 Кликните на любой сектор модели для просмотра информации"
        } else {
            "🎯 Click any sector of the model to see its details"
        },
        "instructions.rotate" => if ru {
            "🖱️ Удерживайте левую кнопку мыши для поворота вокруг оси"
        } else {
            "🖱️ Hold the left mouse button to rotate around the axis"
        },
        "instructions.zoom" => if ru {
            "🔍 Используйте колесико мыши для приближения и отдаления"
        } else {
            "🔍 Use the mouse wheel to zoom in and out"
        },

        // ── Legend ──────────────────────────────────────────
        "legend.title" => if ru { "Блоки" } else { "Blocks" },
        "legend.show" => if ru { "Легенда" } else { "Legend" },

        // ── Modal ───────────────────────────────────────────
        "modal.close" => "×",
        "modal.details" => if ru { "Подробнее" } else { "Details" },
        "modal.download" => if ru { "Скачать материалы" } else { "Download materials" },

        // ── Language ────────────────────────────────────────
        "menu.language" => if ru { "Язык" } else { "Language" },
        "lang.ru" => "Русский",
        "lang.en" => "English",

        // ── Viewport ────────────────────────────────────────
        "viewport.software" => if ru {
            "OpenGL недоступен: упрощённый режим"
        } else {
            "OpenGL unavailable: simplified view"
        },

        // ── Fallback ────────────────────────────────────────
        _ => "???",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYS: &[&str] = &[
        "app.title",
        "header.title",
        "header.subtitle",
        "instructions.click",
        "instructions.rotate",
        "instructions.zoom",
        "legend.title",
        "legend.show",
        "modal.close",
        "modal.details",
        "modal.download",
        "menu.language",
        "lang.ru",
        "lang.en",
        "viewport.software",
    ];

    #[test]
    fn test_all_keys_translated() {
        for lang in [Lang::Ru, Lang::En] {
            for key in KEYS {
                assert_ne!(tr(lang, key), "???", "{key} missing for {lang:?}");
            }
        }
    }

    #[test]
    fn test_russian_strings() {
        assert_eq!(
            tr(Lang::Ru, "header.title"),
            "Инклюзивная трансформация образовательной экосреды университета"
        );
        assert_eq!(tr(Lang::Ru, "modal.details"), "Подробнее");
        assert_eq!(tr(Lang::Ru, "modal.download"), "Скачать материалы");
    }

    #[test]
    fn test_lang_codes() {
        assert_eq!(Lang::from_code("EN"), Lang::En);
        assert_eq!(Lang::from_code("de"), Lang::Ru);
        assert_eq!(Lang::from_code(Lang::En.code()), Lang::En);
    }
}

//! Bilingual label table.
//!
//! Every user-facing string the browser writes goes through [`t`]. The table
//! is a compile-time match, so a new [`Label`] without both translations does
//! not build.

use serde::{Deserialize, Serialize};

/// Display language. English is primary, Japanese secondary.
///
/// Serialized as its code; decoding goes through [`Lang::from_code`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Lang {
    #[default]
    En,
    Ja,
}

impl Lang {
    /// ISO 639-1 code.
    pub fn code(&self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Ja => "ja",
        }
    }

    /// Parse a language code. `jp` is accepted as an alias for `ja`.
    pub fn from_code(code: &str) -> Option<Lang> {
        match code {
            "en" => Some(Lang::En),
            "ja" | "jp" => Some(Lang::Ja),
            _ => None,
        }
    }

    /// The other language.
    pub fn toggled(&self) -> Lang {
        match self {
            Lang::En => Lang::Ja,
            Lang::Ja => Lang::En,
        }
    }
}

impl TryFrom<String> for Lang {
    type Error = String;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        Lang::from_code(&code).ok_or_else(|| format!("unknown language code `{code}`"))
    }
}

/// Logical label keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Label {
    Showing,
    Items,
    ViewDetails,
    WhereToBuy,
    PositionFilter,
    AllPositions,
    GuideHeading,
    PocketDepth,
    Stiffness,
    BreakInTime,
    SizeAndFit,
    NoMatches,
    Positions,
    LanguageToggle,
    Explore,
}

impl Label {
    pub const ALL: [Label; 15] = [
        Label::Showing,
        Label::Items,
        Label::ViewDetails,
        Label::WhereToBuy,
        Label::PositionFilter,
        Label::AllPositions,
        Label::GuideHeading,
        Label::PocketDepth,
        Label::Stiffness,
        Label::BreakInTime,
        Label::SizeAndFit,
        Label::NoMatches,
        Label::Positions,
        Label::LanguageToggle,
        Label::Explore,
    ];

    /// Headings of the buying-guide accordion, in page order.
    pub const GUIDE_SECTIONS: [Label; 4] = [
        Label::PocketDepth,
        Label::Stiffness,
        Label::BreakInTime,
        Label::SizeAndFit,
    ];
}

/// Look up the display string for `label` in `lang`.
pub fn t(label: Label, lang: Lang) -> &'static str {
    match lang {
        Lang::En => english(label),
        Lang::Ja => japanese(label),
    }
}

fn english(label: Label) -> &'static str {
    match label {
        Label::Showing => "Showing",
        Label::Items => "items",
        Label::ViewDetails => "View Details",
        Label::WhereToBuy => "Where to Buy",
        Label::PositionFilter => "Position:",
        Label::AllPositions => "All Positions",
        Label::GuideHeading => "How to Choose Your Perfect Glove",
        Label::PocketDepth => "Pocket Depth",
        Label::Stiffness => "Stiffness",
        Label::BreakInTime => "Break-In Time",
        Label::SizeAndFit => "Size & Fit",
        Label::NoMatches => "No products match your filters.",
        Label::Positions => "Positions:",
        // The toggle advertises the language it switches to.
        Label::LanguageToggle => "日本語",
        Label::Explore => "Explore the Rankings",
    }
}

fn japanese(label: Label) -> &'static str {
    match label {
        Label::Showing => "表示中",
        Label::Items => "アイテム",
        Label::ViewDetails => "詳細を見る",
        Label::WhereToBuy => "購入する",
        Label::PositionFilter => "ポジション:",
        Label::AllPositions => "すべてのポジション",
        Label::GuideHeading => "完璧なグローブの選び方",
        Label::PocketDepth => "ポケットの深さ",
        Label::Stiffness => "硬さ",
        Label::BreakInTime => "ブレークイン時間",
        Label::SizeAndFit => "サイズとフィット感",
        Label::NoMatches => "条件に一致する商品はありません。",
        Label::Positions => "ポジション:",
        Label::LanguageToggle => "EN",
        Label::Explore => "ランキングを見る",
    }
}

use serde::{Deserialize, Serialize};

/// Award variants recognized by the roster and the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Award {
    #[serde(rename = "PL")]
    PresidentsLister,
    #[serde(rename = "DL")]
    DeansLister,
    #[serde(rename = "AA")]
    AcademicAchiever,
}

impl Award {
    pub const ALL: [Award; 3] = [
        Award::PresidentsLister,
        Award::DeansLister,
        Award::AcademicAchiever,
    ];

    /// Short tag used in asset keys and download filenames.
    pub fn tag(self) -> &'static str {
        match self {
            Award::PresidentsLister => "PL",
            Award::DeansLister => "DL",
            Award::AcademicAchiever => "AA",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Award::PresidentsLister => "President's Lister",
            Award::DeansLister => "Dean's Lister",
            Award::AcademicAchiever => "Academic Achiever",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Award::PresidentsLister => 0,
            Award::DeansLister => 1,
            Award::AcademicAchiever => 2,
        }
    }
}

/// RGB color in the 0.0..=1.0 range used by PDF `rg` operators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

pub const WHITE: Rgb = Rgb {
    r: 1.0,
    g: 1.0,
    b: 1.0,
};

/// #6B8EFF, the stroke blue from the certificate artwork.
pub const PERIWINKLE: Rgb = Rgb {
    r: 0.42,
    g: 0.557,
    b: 1.0,
};

/// #D4AF37, used on the Academic Achiever name.
pub const GOLD: Rgb = Rgb {
    r: 0.831,
    g: 0.686,
    b: 0.216,
};

/// Vertical placement of a text baseline on the page.
#[derive(Debug, Clone, Copy)]
pub enum Anchor {
    /// Fraction of the page height; the text block is centered on it.
    Fraction(f32),
    /// Absolute baseline in points from the bottom edge.
    Absolute(f32),
}

/// A second, non-outlined text line (the average-score line).
#[derive(Debug, Clone, Copy)]
pub struct SubtitleSpec {
    /// `{gpa}` is replaced with the record's average.
    pub template: &'static str,
    pub size: f32,
    pub anchor: Anchor,
    pub color: Rgb,
}

/// Fixed visual parameters for one certificate variant.
#[derive(Debug, Clone, Copy)]
pub struct AwardProfile {
    pub award: Award,
    pub template_key: &'static str,
    /// Landscape floor; the page never shrinks below this.
    pub min_width: f32,
    pub min_height: f32,
    pub name_size: f32,
    pub name_anchor: Anchor,
    pub fill: Rgb,
    pub outline: Rgb,
    /// Halo radius in px for the simulated stroke.
    pub outline_offset: f32,
    pub subtitle: Option<SubtitleSpec>,
}

// Landscape A4 in points.
const FLOOR_WIDTH: f32 = 842.0;
const FLOOR_HEIGHT: f32 = 595.0;

static PROFILES: [AwardProfile; 3] = [
    AwardProfile {
        award: Award::PresidentsLister,
        template_key: "certificates/certificate_pl.png",
        min_width: FLOOR_WIDTH,
        min_height: FLOOR_HEIGHT,
        name_size: 110.0,
        name_anchor: Anchor::Fraction(0.56),
        fill: WHITE,
        outline: PERIWINKLE,
        outline_offset: 2.0,
        subtitle: None,
    },
    AwardProfile {
        award: Award::DeansLister,
        template_key: "certificates/certificate_dl.png",
        min_width: FLOOR_WIDTH,
        min_height: FLOOR_HEIGHT,
        name_size: 110.0,
        name_anchor: Anchor::Fraction(0.56),
        fill: WHITE,
        outline: PERIWINKLE,
        outline_offset: 2.0,
        subtitle: None,
    },
    AwardProfile {
        award: Award::AcademicAchiever,
        template_key: "certificates/certificate_aa.png",
        min_width: FLOOR_WIDTH,
        min_height: FLOOR_HEIGHT,
        name_size: 120.0,
        name_anchor: Anchor::Fraction(0.58),
        fill: WHITE,
        outline: GOLD,
        outline_offset: 2.0,
        subtitle: Some(SubtitleSpec {
            template: "With an average of {gpa}",
            size: 64.0,
            anchor: Anchor::Fraction(0.40),
            color: PERIWINKLE,
        }),
    },
];

/// Profile lookup; one entry per award, statically defined.
pub fn profile(award: Award) -> &'static AwardProfile {
    &PROFILES[award.index()]
}

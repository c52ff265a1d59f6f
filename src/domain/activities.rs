//! Per-activity suitability scores (1..=10) with itemized reasons.
//!
//! Each activity is a small table of steps run in order. A step is either an
//! if/else-if chain over the weather inputs, or a closing chain over the score reached
//! so far. Effects differ per rule: some subtract, some overwrite the running score.
//! The two are kept distinct on purpose; bbq's "rain likely" rule sets 4 rather than
//! subtracting from 10.

use serde::Serialize;

use crate::domain::weather::ForecastBundle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Running,
    Carwash,
    Comfort,
    Moto,
    Garden,
    Bbq,
}

impl ActivityKind {
    /// Display order used by the activity guide.
    pub const ALL: [ActivityKind; 6] = [
        ActivityKind::Running,
        ActivityKind::Moto,
        ActivityKind::Garden,
        ActivityKind::Comfort,
        ActivityKind::Bbq,
        ActivityKind::Carwash,
    ];

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            ActivityKind::Running => "running",
            ActivityKind::Carwash => "carwash",
            ActivityKind::Comfort => "comfort",
            ActivityKind::Moto => "moto",
            ActivityKind::Garden => "garden",
            ActivityKind::Bbq => "bbq",
        }
    }

    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ActivityKind::Running => "Koşu",
            ActivityKind::Carwash => "Oto Yıkama",
            ActivityKind::Comfort => "Konfor",
            ActivityKind::Moto => "Motosiklet",
            ActivityKind::Garden => "Bahçe İşleri",
            ActivityKind::Bbq => "Mangal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Pos,
    Neg,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reason {
    pub polarity: Polarity,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityAssessment {
    pub activity: ActivityKind,
    pub label: &'static str,
    pub score: u8,
    pub reasons: Vec<Reason>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActivityInputs {
    temperature_c: f32,
    wind_kmh: f32,
    precipitation_mm: f32,
    humidity_pct: f32,
    rain_probability_today: Option<f32>,
    rain_probability_tomorrow: Option<f32>,
}

impl ActivityInputs {
    fn from_bundle(bundle: &ForecastBundle) -> Self {
        Self {
            temperature_c: bundle.current.temperature_2m_c,
            wind_kmh: bundle.current.wind_speed_10m,
            precipitation_mm: bundle.current.precipitation_mm,
            humidity_pct: bundle.current.relative_humidity_2m,
            rain_probability_today: bundle.precipitation_probability_max(0),
            rain_probability_tomorrow: bundle.precipitation_probability_max(1),
        }
    }

    fn raining(&self) -> bool {
        self.precipitation_mm > 0.0
    }

    fn rain_today_above(&self, pct: f32) -> bool {
        self.rain_probability_today.is_some_and(|p| p > pct)
    }

    fn rain_tomorrow_above(&self, pct: f32) -> bool {
        self.rain_probability_tomorrow.is_some_and(|p| p > pct)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ScoreEffect {
    Keep,
    SetScore(f32),
    AddDelta(f32),
}

impl ScoreEffect {
    fn apply(self, score: f32) -> f32 {
        match self {
            ScoreEffect::Keep => score,
            ScoreEffect::SetScore(value) => value,
            ScoreEffect::AddDelta(delta) => score + delta,
        }
    }
}

struct Rule {
    when: fn(&ActivityInputs) -> bool,
    effect: ScoreEffect,
    polarity: Polarity,
    text: &'static str,
}

struct ClosingRule {
    when: fn(f32) -> bool,
    polarity: Polarity,
    text: &'static str,
}

enum Step {
    /// if / else-if chain: only the first matching rule applies.
    FirstOf(&'static [Rule]),
    /// Evaluated against the running (unclamped) score.
    Closing(&'static [ClosingRule]),
}

struct ActivityTable {
    base: fn(&ActivityInputs) -> f32,
    steps: &'static [Step],
}

const MAX_SCORE: f32 = 10.0;
const MIN_SCORE: f32 = 1.0;
const COMFORT_IDEAL_C: f32 = 22.0;

const RUNNING: ActivityTable = ActivityTable {
    base: |_| MAX_SCORE,
    steps: &[
        Step::FirstOf(&[
            Rule {
                when: |i| i.temperature_c > 25.0,
                effect: ScoreEffect::AddDelta(-3.0),
                polarity: Polarity::Neg,
                text: "Hava sıcak, performans düşebilir.",
            },
            Rule {
                when: |i| i.temperature_c < 5.0,
                effect: ScoreEffect::AddDelta(-3.0),
                polarity: Polarity::Neg,
                text: "Hava çok soğuk.",
            },
            Rule {
                when: |_| true,
                effect: ScoreEffect::Keep,
                polarity: Polarity::Pos,
                text: "Sıcaklık koşu için ideal.",
            },
        ]),
        Step::FirstOf(&[Rule {
            when: ActivityInputs::raining,
            effect: ScoreEffect::AddDelta(-4.0),
            polarity: Polarity::Neg,
            text: "Yağış var, zemin kaygan.",
        }]),
        Step::FirstOf(&[Rule {
            when: |i| i.wind_kmh > 20.0,
            effect: ScoreEffect::AddDelta(-2.0),
            polarity: Polarity::Neg,
            text: "Rüzgar direnci yüksek.",
        }]),
    ],
};

const CARWASH: ActivityTable = ActivityTable {
    base: |_| MAX_SCORE,
    steps: &[Step::FirstOf(&[
        Rule {
            when: |i| i.rain_today_above(30.0),
            effect: ScoreEffect::AddDelta(-5.0),
            polarity: Polarity::Neg,
            text: "Bugün yağmur riski var.",
        },
        Rule {
            when: |i| i.rain_tomorrow_above(30.0),
            effect: ScoreEffect::AddDelta(-4.0),
            polarity: Polarity::Neg,
            text: "Yarın yağmur bekleniyor.",
        },
        Rule {
            when: |_| true,
            effect: ScoreEffect::Keep,
            polarity: Polarity::Pos,
            text: "Önümüzdeki günler açık görünüyor.",
        },
    ])],
};

const COMFORT: ActivityTable = ActivityTable {
    base: |i| MAX_SCORE - 0.5 * (i.temperature_c - COMFORT_IDEAL_C).abs(),
    steps: &[
        Step::FirstOf(&[Rule {
            when: |i| i.temperature_c > 25.0 && i.humidity_pct > 60.0,
            effect: ScoreEffect::AddDelta(-2.0),
            polarity: Polarity::Neg,
            text: "Yüksek nem bunaltıcı olabilir.",
        }]),
        Step::FirstOf(&[Rule {
            when: |i| i.temperature_c < 15.0 && i.wind_kmh > 15.0,
            effect: ScoreEffect::AddDelta(-2.0),
            polarity: Polarity::Neg,
            text: "Rüzgar hissedilen sıcaklığı düşürüyor.",
        }]),
        Step::Closing(&[
            ClosingRule {
                when: |score| score > 8.0,
                polarity: Polarity::Pos,
                text: "Termal konfor yüksek.",
            },
            ClosingRule {
                when: |score| score < 5.0,
                polarity: Polarity::Neg,
                text: "Konfor seviyesi düşük.",
            },
        ]),
    ],
};

const MOTO: ActivityTable = ActivityTable {
    base: |_| MAX_SCORE,
    steps: &[
        Step::FirstOf(&[
            Rule {
                when: ActivityInputs::raining,
                effect: ScoreEffect::SetScore(1.0),
                polarity: Polarity::Neg,
                text: "Yağış var, sürüş tehlikeli.",
            },
            Rule {
                when: |i| i.rain_today_above(50.0),
                effect: ScoreEffect::AddDelta(-4.0),
                polarity: Polarity::Neg,
                text: "Yüksek yağmur ihtimali.",
            },
        ]),
        Step::FirstOf(&[Rule {
            when: |i| i.wind_kmh > 25.0,
            effect: ScoreEffect::AddDelta(-3.0),
            polarity: Polarity::Neg,
            text: "Şiddetli yan rüzgar riski.",
        }]),
        Step::FirstOf(&[Rule {
            when: |i| i.temperature_c < 5.0,
            effect: ScoreEffect::AddDelta(-3.0),
            polarity: Polarity::Neg,
            text: "Hava çok soğuk, ekipman önemli.",
        }]),
        Step::Closing(&[ClosingRule {
            when: |score| score > 8.0,
            polarity: Polarity::Pos,
            text: "Sürüş için harika bir hava.",
        }]),
    ],
};

const GARDEN: ActivityTable = ActivityTable {
    base: |_| MAX_SCORE,
    steps: &[
        Step::FirstOf(&[
            Rule {
                when: ActivityInputs::raining,
                effect: ScoreEffect::SetScore(1.0),
                polarity: Polarity::Neg,
                text: "Toprak çamurlu.",
            },
            Rule {
                when: |i| i.rain_today_above(60.0),
                effect: ScoreEffect::AddDelta(-3.0),
                polarity: Polarity::Neg,
                text: "Yağmur riski yüksek.",
            },
        ]),
        Step::FirstOf(&[Rule {
            when: |i| i.wind_kmh > 30.0,
            effect: ScoreEffect::AddDelta(-4.0),
            polarity: Polarity::Neg,
            text: "Rüzgar bitkilere zarar verebilir.",
        }]),
        Step::FirstOf(&[Rule {
            when: |i| i.temperature_c > 32.0,
            effect: ScoreEffect::AddDelta(-3.0),
            polarity: Polarity::Neg,
            text: "Güneş çarpması riski.",
        }]),
    ],
};

const BBQ: ActivityTable = ActivityTable {
    base: |_| MAX_SCORE,
    steps: &[
        Step::FirstOf(&[
            Rule {
                when: ActivityInputs::raining,
                effect: ScoreEffect::SetScore(1.0),
                polarity: Polarity::Neg,
                text: "Yağmur yağıyor.",
            },
            Rule {
                when: |i| i.rain_today_above(30.0),
                effect: ScoreEffect::SetScore(4.0),
                polarity: Polarity::Neg,
                text: "Yağmur riski keyif kaçırabilir.",
            },
        ]),
        Step::FirstOf(&[Rule {
            when: |i| i.wind_kmh > 20.0,
            effect: ScoreEffect::AddDelta(-4.0),
            polarity: Polarity::Neg,
            text: "Rüzgar ateşi etkileyebilir.",
        }]),
        Step::FirstOf(&[Rule {
            when: |i| i.temperature_c < 12.0,
            effect: ScoreEffect::AddDelta(-3.0),
            polarity: Polarity::Neg,
            text: "Hava serin, sıkı giyinin.",
        }]),
        Step::Closing(&[ClosingRule {
            when: |score| score > 8.0,
            polarity: Polarity::Pos,
            text: "Mangal için mükemmel şartlar.",
        }]),
    ],
};

fn table_for(kind: ActivityKind) -> &'static ActivityTable {
    match kind {
        ActivityKind::Running => &RUNNING,
        ActivityKind::Carwash => &CARWASH,
        ActivityKind::Comfort => &COMFORT,
        ActivityKind::Moto => &MOTO,
        ActivityKind::Garden => &GARDEN,
        ActivityKind::Bbq => &BBQ,
    }
}

#[must_use]
pub fn assess_activity(kind: ActivityKind, bundle: &ForecastBundle) -> ActivityAssessment {
    let inputs = ActivityInputs::from_bundle(bundle);
    let table = table_for(kind);
    let mut score = (table.base)(&inputs);
    let mut reasons = Vec::new();

    for step in table.steps {
        match step {
            Step::FirstOf(rules) => {
                if let Some(rule) = rules.iter().find(|rule| (rule.when)(&inputs)) {
                    score = rule.effect.apply(score);
                    reasons.push(Reason {
                        polarity: rule.polarity,
                        text: rule.text.to_string(),
                    });
                }
            }
            Step::Closing(rules) => {
                let reported = f32::from(clamp_score(score));
                if let Some(rule) = rules.iter().find(|rule| (rule.when)(reported)) {
                    reasons.push(Reason {
                        polarity: rule.polarity,
                        text: rule.text.to_string(),
                    });
                }
            }
        }
    }

    ActivityAssessment {
        activity: kind,
        label: kind.label(),
        score: clamp_score(score),
        reasons,
    }
}

/// Every activity, in guide order.
#[must_use]
pub fn assess_all(bundle: &ForecastBundle) -> Vec<ActivityAssessment> {
    ActivityKind::ALL
        .into_iter()
        .map(|kind| assess_activity(kind, bundle))
        .collect()
}

// NaN lands on 0 after the cast, hence the trailing max.
fn clamp_score(score: f32) -> u8 {
    (score.clamp(MIN_SCORE, MAX_SCORE).round() as u8).max(1)
}

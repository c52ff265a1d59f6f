//! Rule-based mood and advice, the deterministic fallback for the AI advice card.
//!
//! Night and day each have an ordered table; the first rule whose condition holds
//! picks the mood. A poor air-quality reading appends one caution sentence afterwards,
//! whatever rule matched.

use serde::Serialize;

use crate::domain::weather::{ForecastBundle, Units};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdviceResult {
    pub mood: String,
    pub advice: String,
    pub activities: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct AdviceInputs {
    temperature_c: f32,
    weather_code: u8,
    wind_kmh: f32,
    rain_probability_today: f32,
}

impl AdviceInputs {
    fn from_bundle(bundle: &ForecastBundle) -> Self {
        Self {
            temperature_c: bundle.current.temperature_2m_c,
            weather_code: bundle.current.weather_code,
            wind_kmh: bundle.current.wind_speed_10m,
            rain_probability_today: bundle.precipitation_probability_max(0).unwrap_or(0.0),
        }
    }
}

#[derive(Debug)]
struct MoodProfile {
    mood: &'static str,
    advice: &'static str,
    activities: &'static [&'static str],
}

struct AdviceRule {
    applies: fn(&AdviceInputs) -> bool,
    profile: MoodProfile,
}

const AIR_QUALITY_CAUTION: &str =
    " Dikkat: Hava kirliliği yüksek, açık hava sporlarını erteleyebilirsin.";

const NIGHT_RULES: &[AdviceRule] = &[
    AdviceRule {
        applies: |i| i.weather_code <= 2,
        profile: MoodProfile {
            mood: "Huzurlu Gece",
            advice: "Gökyüzü açık ve sakin. Şehrin ışıklarından uzaklaşabilirsen harika bir yıldız manzarası var.",
            activities: &["Yıldız İzleme", "Gece Yürüyüşü", "Sıcak Bir Çay", "Meditasyon"],
        },
    },
    AdviceRule {
        applies: |i| i.weather_code >= 51,
        profile: MoodProfile {
            mood: "Melankolik",
            advice: "Dışarıda yağmurun sesi var, içeride ise huzur. Kendine vakit ayırmak için mükemmel bir atmosfer.",
            activities: &["Loş Işıkta Film", "Kitap & Battaniye", "Jazz Müzik", "Uyku Öncesi Yoga"],
        },
    },
    AdviceRule {
        applies: |_| true,
        profile: MoodProfile {
            mood: "Sakin",
            advice: "Serin ve kapalı bir gece. Yarınki planlarını gözden geçirmek veya erken uyumak için iyi bir fırsat.",
            activities: &["Cilt Bakımı", "Günlük Yazma", "Podcast Dinleme"],
        },
    },
];

const DAY_RULES: &[AdviceRule] = &[
    AdviceRule {
        applies: |i| i.weather_code >= 95 || i.weather_code == 82,
        profile: MoodProfile {
            mood: "Kaotik",
            advice: "Dışarısı şu an pek tekin değil. Fırtına geçene kadar güvenli ve kuru bir yerde kal.",
            activities: &[
                "Ev Düzenleme",
                "Yemek Denemeleri",
                "Online Oyunlar",
                "Eski Fotoğraflara Bakma",
            ],
        },
    },
    AdviceRule {
        applies: |i| i.weather_code >= 71,
        profile: MoodProfile {
            mood: "Büyülü Beyaz",
            advice: "Şehir beyaza bürünüyor! Soğuğa aldırmayıp bu görsel şölenin tadını çıkarabilirsin.",
            activities: &["Fotoğraf Çekimi", "Salep Keyfi", "Kış Yürüyüşü", "Pencere Kenarı Keyfi"],
        },
    },
    AdviceRule {
        applies: |i| i.weather_code >= 51 || i.rain_probability_today > 80.0,
        profile: MoodProfile {
            mood: "Islak & Gri",
            advice: "Gri bulutlar şehre hakim. Islanmayı sevmiyorsan kapalı mekan planları yapmalısın.",
            activities: &["Müze/Galeri Gezisi", "AVM Turu", "Sinema", "Kahve Dükkanı Keşfi"],
        },
    },
    AdviceRule {
        applies: |i| i.temperature_c > 32.0,
        profile: MoodProfile {
            mood: "Kavurucu",
            advice: "Güneş yakıcı seviyede. Dışarıda fazla kalmamaya ve bol sıvı tüketmeye dikkat et.",
            activities: &["Yüzme Havuzu", "Kliması Olan Mekanlar", "Soğuk Kahve Molası", "Siesta"],
        },
    },
    AdviceRule {
        applies: |i| i.temperature_c < 5.0,
        profile: MoodProfile {
            mood: "Dondurucu",
            advice: "Hava ısırıyor! Kat kat giyinmeden kapıdan çıkma. Sıcak içecekler en iyi dostun olacak.",
            activities: &["Sıcak Çikolata", "Arkadaş Evinde Toplanma", "Termal Giyim Alışverişi"],
        },
    },
    AdviceRule {
        applies: |i| i.wind_kmh > 30.0,
        profile: MoodProfile {
            mood: "Rüzgarlı",
            advice: "Rüzgar saçını başını dağıtabilir. Açık alanlarda yürümek biraz zorlayıcı olabilir.",
            activities: &["Uçurtma Uçurma (Varsa)", "Hızlı Tempolu Yürüyüş", "Kapalı Spor Salonu"],
        },
    },
    AdviceRule {
        applies: |i| (18.0..=26.0).contains(&i.temperature_c) && i.weather_code <= 3,
        profile: MoodProfile {
            mood: "Enerjik",
            advice: "Hava tam anlamıyla 'gezmelik'. Evde durmak için çok güzel bir gün, dışarı at kendini!",
            activities: &[
                "Yeni Semt Keşfi",
                "Sahil Yürüyüşü",
                "Dışarıda Yemek",
                "Fotoğraf Safarisi",
            ],
        },
    },
    AdviceRule {
        applies: |_| true,
        profile: MoodProfile {
            mood: "Durağan",
            advice: "Ne çok sıcak, ne çok soğuk. Günlük rutinlerini halletmek için ideal bir gün.",
            activities: &["Alışveriş", "Arkadaş Buluşması", "Kütüphane", "Park Yürüyüşü"],
        },
    },
];

/// Mood, advice sentence and suggested activities for the current conditions.
///
/// `units` does not move any threshold; every rule reads celsius and km/h.
#[must_use]
pub fn generate_advice(bundle: &ForecastBundle, _units: Units) -> AdviceResult {
    let inputs = AdviceInputs::from_bundle(bundle);
    let rules = if bundle.current.is_day {
        DAY_RULES
    } else {
        NIGHT_RULES
    };
    let profile = first_match(rules, &inputs);

    let mut advice = profile.advice.to_string();
    if bundle.european_aqi().is_some_and(|aqi| aqi > 80.0) {
        advice.push_str(AIR_QUALITY_CAUTION);
    }

    AdviceResult {
        mood: profile.mood.to_string(),
        advice,
        activities: profile.activities.iter().map(|a| (*a).to_string()).collect(),
    }
}

fn first_match<'a>(rules: &'a [AdviceRule], inputs: &AdviceInputs) -> &'a MoodProfile {
    rules
        .iter()
        .find(|rule| (rule.applies)(inputs))
        .map_or(&FALLBACK, |rule| &rule.profile)
}

// Both tables end in a catch-all, so this is only reachable with an empty table.
const FALLBACK: MoodProfile = MoodProfile {
    mood: "Dengeli",
    advice: "Hava koşulları standart seyrediyor.",
    activities: &[],
};

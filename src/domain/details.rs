//! Short descriptors shown next to raw readings in the details grid.

use serde::Serialize;

#[must_use]
pub fn dew_point_feel(dew_point_c: f32) -> &'static str {
    if dew_point_c < 10.0 {
        "Kuru"
    } else if dew_point_c < 15.0 {
        "Rahat"
    } else if dew_point_c < 20.0 {
        "Nemli"
    } else {
        "Bunaltıcı"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UvDescriptor {
    pub level: &'static str,
    pub advice: &'static str,
}

#[must_use]
pub fn uv_descriptor(uv_index: f32) -> UvDescriptor {
    if uv_index > 7.0 {
        UvDescriptor {
            level: "Çok Yüksek",
            advice: "10:00 - 16:00 arası dışarı çıkmaktan kaçının.",
        }
    } else if uv_index > 5.0 {
        UvDescriptor {
            level: "Yüksek",
            advice: "Güneş kremi sürün, gölgede kalın.",
        }
    } else if uv_index > 2.0 {
        UvDescriptor {
            level: "Orta",
            advice: "Şapka ve güneş gözlüğü takın.",
        }
    } else {
        UvDescriptor {
            level: "Düşük",
            advice: "Güneş kremi gerekmez.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dew_point_bands() {
        assert_eq!(dew_point_feel(4.0), "Kuru");
        assert_eq!(dew_point_feel(10.0), "Rahat");
        assert_eq!(dew_point_feel(19.9), "Nemli");
        assert_eq!(dew_point_feel(20.0), "Bunaltıcı");
    }

    #[test]
    fn uv_bands() {
        assert_eq!(uv_descriptor(1.0).level, "Düşük");
        assert_eq!(uv_descriptor(2.5).level, "Orta");
        assert_eq!(uv_descriptor(6.0).level, "Yüksek");
        assert_eq!(uv_descriptor(7.0).level, "Yüksek");
        assert_eq!(uv_descriptor(9.0).level, "Çok Yüksek");
    }
}

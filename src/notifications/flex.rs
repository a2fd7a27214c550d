use serde_json::{json, Value};

use crate::sensor::client::SensorReading;

/// Display theme for a PM2.5 band, mirroring the dashboard's color scale.
pub struct AirQualityLevel {
    pub color: &'static str,
    pub background: &'static str,
    pub label: &'static str,
}

pub fn level_for(pm25: f64) -> AirQualityLevel {
    if pm25 <= 25.0 {
        AirQualityLevel {
            color: "#10b981",
            background: "#ecfdf5",
            label: "อากาศดีเยี่ยม 🌳",
        }
    } else if pm25 <= 37.0 {
        AirQualityLevel {
            color: "#f59e0b",
            background: "#fffbeb",
            label: "เริ่มมีฝุ่นเล็กน้อย 😷",
        }
    } else if pm25 <= 50.0 {
        AirQualityLevel {
            color: "#f97316",
            background: "#fff7ed",
            label: "ควรสวมหน้ากาก ⚠️",
        }
    } else {
        AirQualityLevel {
            color: "#ef4444",
            background: "#fef2f2",
            label: "อันตราย งดกิจกรรม 🚨",
        }
    }
}

/// Builds the LINE flex bubble for a PM2.5 alert: colored header, big reading,
/// temperature/humidity row and a button linking to the dashboard.
pub fn build_alert_message(reading: &SensorReading, dashboard_url: &str) -> Value {
    let theme = level_for(reading.pm25);

    json!({
        "type": "flex",
        "altText": format!("แจ้งเตือนฝุ่น PM2.5: {} µg/m³", reading.pm25),
        "contents": {
            "type": "bubble",
            "size": "mega",
            "header": {
                "type": "box",
                "layout": "vertical",
                "contents": [
                    { "type": "text", "text": "LOMbbv REPORT", "color": "#ffffffaa", "size": "xs", "weight": "bold" },
                    { "type": "text", "text": "โรงเรียนบางปะกงฯ", "color": "#ffffff", "size": "lg", "weight": "bold" }
                ],
                "backgroundColor": theme.color,
                "paddingAll": "20px"
            },
            "body": {
                "type": "box",
                "layout": "vertical",
                "backgroundColor": "#ffffff",
                "contents": [
                    { "type": "text", "text": theme.label, "weight": "bold", "size": "xl", "align": "center", "color": theme.color, "wrap": true },
                    {
                        "type": "box",
                        "layout": "vertical",
                        "margin": "xl",
                        "contents": [
                            { "type": "text", "text": "PM 2.5", "size": "sm", "color": "#aaaaaa", "align": "center" },
                            { "type": "text", "text": format!("{}", reading.pm25), "size": "5xl", "weight": "bold", "color": "#333333", "align": "center" },
                            { "type": "text", "text": "µg/m³", "size": "xs", "color": "#aaaaaa", "align": "center" }
                        ]
                    },
                    { "type": "separator", "margin": "xl" },
                    {
                        "type": "box",
                        "layout": "horizontal",
                        "margin": "xl",
                        "contents": [
                            {
                                "type": "box", "layout": "vertical", "flex": 1,
                                "contents": [
                                    { "type": "text", "text": "อุณหภูมิ", "size": "xs", "color": "#aaaaaa", "align": "center" },
                                    { "type": "text", "text": format!("{}°C", reading.temperature), "size": "lg", "weight": "bold", "color": "#333333", "align": "center" }
                                ]
                            },
                            {
                                "type": "box", "layout": "vertical", "flex": 1,
                                "contents": [
                                    { "type": "text", "text": "ความชื้น", "size": "xs", "color": "#aaaaaa", "align": "center" },
                                    { "type": "text", "text": format!("{}%", reading.humidity), "size": "lg", "weight": "bold", "color": "#333333", "align": "center" }
                                ]
                            }
                        ]
                    }
                ]
            },
            "footer": {
                "type": "box",
                "layout": "vertical",
                "contents": [
                    {
                        "type": "button",
                        "action": { "type": "uri", "label": "ดู Dashboard เต็ม", "uri": dashboard_url },
                        "style": "primary",
                        "color": theme.color
                    }
                ]
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(pm25: f64) -> SensorReading {
        SensorReading {
            station_name: None,
            pm25,
            pm10: 0.0,
            temperature: 31.0,
            humidity: 60.0,
            wind_speed: 0.0,
            wind_direction: 0.0,
            rainfall: 0.0,
            observed_at: None,
        }
    }

    #[test]
    fn level_bands_match_dashboard_scale() {
        assert_eq!(level_for(0.0).color, "#10b981");
        assert_eq!(level_for(25.0).color, "#10b981");
        assert_eq!(level_for(25.1).color, "#f59e0b");
        assert_eq!(level_for(37.0).color, "#f59e0b");
        assert_eq!(level_for(50.0).color, "#f97316");
        assert_eq!(level_for(50.1).color, "#ef4444");
    }

    #[test]
    fn message_carries_reading_and_dashboard_link() {
        let msg = build_alert_message(&reading(62.0), "https://airatbbv.vercel.app");
        assert_eq!(msg["type"], "flex");
        assert_eq!(msg["altText"], "แจ้งเตือนฝุ่น PM2.5: 62 µg/m³");
        assert_eq!(
            msg["contents"]["footer"]["contents"][0]["action"]["uri"],
            "https://airatbbv.vercel.app"
        );
        // Danger band colors the header red.
        assert_eq!(msg["contents"]["header"]["backgroundColor"], "#ef4444");
    }
}

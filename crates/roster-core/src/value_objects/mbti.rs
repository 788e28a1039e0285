//! The sixteen MBTI personality types
//!
//! Parsing accepts any casing and surrounding whitespace; the canonical form
//! is always the four uppercase letters.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// One of the 16 MBTI types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MbtiType {
    Intj,
    Intp,
    Entj,
    Entp,
    Infj,
    Infp,
    Enfj,
    Enfp,
    Istj,
    Isfj,
    Estj,
    Esfj,
    Istp,
    Isfp,
    Estp,
    Esfp,
}

/// Display metadata for a type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MbtiTypeInfo {
    pub code: MbtiType,
    pub name: &'static str,
    pub english_name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid MBTI type: {0}")]
pub struct MbtiTypeParseError(pub String);

impl MbtiType {
    /// All types in catalogue order (analysts, diplomats, sentinels, explorers)
    pub const ALL: [MbtiType; 16] = [
        MbtiType::Intj,
        MbtiType::Intp,
        MbtiType::Entj,
        MbtiType::Entp,
        MbtiType::Infj,
        MbtiType::Infp,
        MbtiType::Enfj,
        MbtiType::Enfp,
        MbtiType::Istj,
        MbtiType::Isfj,
        MbtiType::Estj,
        MbtiType::Esfj,
        MbtiType::Istp,
        MbtiType::Isfp,
        MbtiType::Estp,
        MbtiType::Esfp,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            MbtiType::Intj => "INTJ",
            MbtiType::Intp => "INTP",
            MbtiType::Entj => "ENTJ",
            MbtiType::Entp => "ENTP",
            MbtiType::Infj => "INFJ",
            MbtiType::Infp => "INFP",
            MbtiType::Enfj => "ENFJ",
            MbtiType::Enfp => "ENFP",
            MbtiType::Istj => "ISTJ",
            MbtiType::Isfj => "ISFJ",
            MbtiType::Estj => "ESTJ",
            MbtiType::Esfj => "ESFJ",
            MbtiType::Istp => "ISTP",
            MbtiType::Isfp => "ISFP",
            MbtiType::Estp => "ESTP",
            MbtiType::Esfp => "ESFP",
        }
    }

    /// Chinese name, English name and description
    pub const fn info(self) -> MbtiTypeInfo {
        let (name, english_name, description) = match self {
            MbtiType::Intj => ("建筑师", "Architect", "富有想象力和战略性的思考者，一切都要经过深思熟虑"),
            MbtiType::Intp => ("逻辑学家", "Logician", "具有创新想法和独特见解的发明家"),
            MbtiType::Entj => ("指挥官", "Commander", "大胆、富有想象力的领导者，总能找到或创造解决方案"),
            MbtiType::Entp => ("辩论家", "Debater", "聪明好奇的思想家，不会放过任何智力挑战"),
            MbtiType::Infj => ("提倡者", "Advocate", "安静而神秘，富有同情心和洞察力"),
            MbtiType::Infp => ("调停者", "Mediator", "诗意、善良的利他主义者，总是热情地为正当理由而努力"),
            MbtiType::Enfj => ("主人公", "Protagonist", "富有魅力和鼓舞人心的领导者，具有强烈的同理心"),
            MbtiType::Enfp => ("竞选者", "Campaigner", "热情、有创造力、社交能力强，总是能找到理由微笑"),
            MbtiType::Istj => ("物流师", "Logistician", "实际而注重事实的个体，可靠性无可挑剔"),
            MbtiType::Isfj => ("守卫者", "Defender", "非常专注和温暖的守护者，时刻准备保护所爱的人"),
            MbtiType::Estj => ("总经理", "Executive", "优秀的管理者，在管理事情或人员方面无与伦比"),
            MbtiType::Esfj => ("执政官", "Consul", "非常关心他人，社交能力强，总是渴望帮助"),
            MbtiType::Istp => ("鉴赏家", "Virtuoso", "大胆而实际的实验家，掌握各种工具"),
            MbtiType::Isfp => ("探险家", "Adventurer", "灵活而有魅力的艺术家，随时准备探索和体验新事物"),
            MbtiType::Estp => ("企业家", "Entrepreneur", "聪明、精力充沛、非常善于感知的人，真正享受生活在边缘"),
            MbtiType::Esfp => ("表演者", "Entertainer", "自发的、精力充沛的表演者，生活永远不会无聊"),
        };
        MbtiTypeInfo {
            code: self,
            name,
            english_name,
            description,
        }
    }
}

impl FromStr for MbtiType {
    type Err = MbtiTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        MbtiType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(code))
            .ok_or_else(|| MbtiTypeParseError(s.to_string()))
    }
}

impl fmt::Display for MbtiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for MbtiType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MbtiType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("intj".parse::<MbtiType>().unwrap(), MbtiType::Intj);
        assert_eq!(" EnFp ".parse::<MbtiType>().unwrap(), MbtiType::Enfp);
        assert_eq!("ESTP".parse::<MbtiType>().unwrap().to_string(), "ESTP");
    }

    #[test]
    fn test_parse_rejects_unknown_codes() {
        for bad in ["", "INT", "INTJX", "ABCD", "XNTJ"] {
            assert!(bad.parse::<MbtiType>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn test_all_codes_are_distinct_and_round_trip() {
        let codes: HashSet<_> = MbtiType::ALL.iter().map(|t| t.as_str()).collect();
        assert_eq!(codes.len(), 16);
        for t in MbtiType::ALL {
            assert_eq!(t.as_str().parse::<MbtiType>().unwrap(), t);
        }
    }

    #[test]
    fn test_serde_uses_uppercase_code() {
        assert_eq!(serde_json::to_string(&MbtiType::Isfj).unwrap(), "\"ISFJ\"");
        let parsed: MbtiType = serde_json::from_str("\"isfj\"").unwrap();
        assert_eq!(parsed, MbtiType::Isfj);
        assert!(serde_json::from_str::<MbtiType>("\"QQQQ\"").is_err());
    }

    #[test]
    fn test_info() {
        let info = MbtiType::Intj.info();
        assert_eq!(info.name, "建筑师");
        assert_eq!(info.english_name, "Architect");
        assert_eq!(MbtiType::Esfp.info().english_name, "Entertainer");
    }
}

use blind_score::policy::MAX_WEIGHT;
use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,

    /// Pool `GET /question` draws from.
    #[serde(default = "default_questions")]
    pub questions: Vec<String>,

    /// Largest weight `POST /compute` accepts; may only narrow the default `1..=5`.
    #[serde(default = "default_max_weight")]
    pub max_weight: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            questions: default_questions(),
            max_weight: default_max_weight(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_port() -> u16 {
    5000
}
fn default_max_weight() -> u8 {
    MAX_WEIGHT
}

fn default_questions() -> Vec<String> {
    [
        "본인에 대해 간단히 소개해 주세요.",
        "우리 회사에 지원하게 된 동기는 무엇인가요?",
        "본인의 강점과 약점은 무엇이라고 생각하나요?",
        "본인의 가치관을 형성한 경험은 무엇인가요?",
        "이 직무를 수행하는 데 필요한 역량은 무엇이라고 생각하나요?",
        "관련 경험 중 가장 기억에 남는 프로젝트는 무엇인가요?",
        "어려운 문제를 해결했던 경험을 말해 주세요.",
        "팀원과의 의견 충돌을 조율한 경험이 있다면?",
        "우리 회사에 대해 아는 대로 말해보세요.",
        "가장 존경하는 인물과 그 이유는?",
        "동료가 비윤리적인 행동을 했을 때 어떻게 하시겠습니까?",
    ]
    .iter()
    .map(|q| q.to_string())
    .collect()
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config: Config = Figment::new()
            .merge(Toml::file("score-server.toml"))
            .merge(Env::prefixed("SCORE_SERVER_"))
            .extract()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_deployment() {
        let config = Config::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 5000);
        assert_eq!(config.questions.len(), 11);
        assert_eq!(config.max_weight, 5);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: Config = Figment::new()
            .merge(Toml::string("port = 8080\nquestions = [\"Why us?\"]"))
            .extract()
            .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.questions, vec!["Why us?".to_string()]);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.max_weight, 5);
    }
}

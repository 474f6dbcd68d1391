use blind_score::errors::BlindScoreError;
use blind_score::features::Category;
use blind_score::keypair::KeyPair;
use blind_score::policy::ScoringPolicy;
use blind_score::preset::lexicon::Lexicon;
use blind_score::protocol::{Aggregator, ComputeRequest, ComputeResponse};
use blind_score::score::{Grade, ScoreReport};
use blind_score::session::{Prepared, Session};

fn session() -> Result<Session, BlindScoreError> {
    Ok(Session::with_keys(KeyPair::generate(512)?, Lexicon::default()))
}

/// Simulates the HTTP hop: the server only ever sees the serialized request.
fn over_the_wire(request: &ComputeRequest) -> Result<ComputeResponse, BlindScoreError> {
    let body = serde_json::to_string(request)?;
    let received: ComputeRequest = serde_json::from_str(&body)?;
    let reply = Aggregator::default().aggregate(&received)?;
    Ok(serde_json::from_str(&serde_json::to_string(&reply)?)?)
}

fn score(
    session: &Session,
    answer: &str,
    policy: &ScoringPolicy,
) -> Result<ScoreReport, BlindScoreError> {
    match session.prepare(answer, policy)? {
        Prepared::Degenerate(report) => Ok(report),
        Prepared::Pending(pending) => {
            let response = over_the_wire(pending.request())?;
            pending.finish(session, &response)
        }
    }
}

#[test]
fn happy_flow() -> Result<(), BlindScoreError> {
    let session = session()?;
    let answer = "음 저는 AI 데이터 프로그래밍 에 열정 이 있고 팀 에서 협업 과 소통 을 주도 했습니다";

    let report = score(&session, answer, &ScoringPolicy::default())?;

    let values: Vec<u64> = report.breakdown().iter().map(|e| e.raw_value).collect();
    assert_eq!(values, vec![17, 1, 3, 1, 1, 3]);
    assert_eq!(report.total_reward(), 25);
    assert_eq!(report.total_penalty(), -1);

    let result = report.result();
    assert_eq!(result.raw_total(), 24);
    assert_eq!(result.max_possible(), 100);
    assert_eq!(result.percent(), 24);
    assert_eq!(result.grade(), Grade::NeedsImprovement);

    Ok(())
}

#[test]
fn weights_scale_contributions_blindly() -> Result<(), BlindScoreError> {
    let session = session()?;
    let policy = ScoringPolicy::try_with([1, 5, 5, 2, 1, 5])?;
    let answer = "열정 성실 책임감 도전 AI 머신러닝 팀 협업 소통 음 음";

    let report = score(&session, answer, &policy)?;
    let contributions: Vec<(Category, i64, i64)> = report
        .breakdown()
        .iter()
        .map(|e| (e.category, e.raw_contribution, e.capped_contribution))
        .collect();
    assert_eq!(
        contributions,
        vec![
            (Category::Length, 11, 11),
            (Category::Positive, 20, 20),
            (Category::Keywords, 10, 10),
            (Category::Hesitation, -6, -6),
            (Category::SelfLead, 0, 0),
            (Category::Teamwork, 15, 15),
        ]
    );
    assert_eq!(report.result().raw_total(), 50);
    assert_eq!(report.result().percent(), 50);
    assert_eq!(report.result().grade(), Grade::Fair);
    Ok(())
}

#[test]
fn zero_weight_categories_never_leave_the_client() -> Result<(), BlindScoreError> {
    let session = session()?;
    let policy = ScoringPolicy::try_with([0, 1, 1, 1, 0, 1])?;

    let Prepared::Pending(pending) = session.prepare("열정 팀 AI 음", &policy)? else {
        panic!("expected an encrypted request");
    };
    assert_eq!(pending.request().encrypted_features.len(), 4);
    assert_eq!(pending.request().weights, vec!["1", "1", "1", "1"]);

    let report = pending.finish(&session, &over_the_wire(pending.request())?)?;
    assert!(
        report
            .breakdown()
            .iter()
            .all(|e| e.category != Category::Length && e.category != Category::SelfLead)
    );
    assert_eq!(report.result().max_possible(), 60);
    Ok(())
}

#[test]
fn all_weights_zero_cannot_be_evaluated() -> Result<(), BlindScoreError> {
    let session = session()?;
    let policy = ScoringPolicy::try_with([0; 6])?;

    let report = score(&session, "팀 협업", &policy)?;
    assert!(report.is_degenerate());
    assert_eq!(report.result().raw_total(), -100);
    assert_eq!(report.result().max_possible(), 0);
    assert_eq!(report.result().percent(), -100);
    assert_eq!(report.result().grade(), Grade::NeedsImprovement);
    Ok(())
}

#[test]
fn heavy_hesitation_clamps_to_zero() -> Result<(), BlindScoreError> {
    let session = session()?;
    let policy = ScoringPolicy::try_with([1, 1, 1, 5, 1, 1])?;

    let report = score(&session, "음 어 그 저 음음음 어어", &policy)?;
    assert_eq!(report.total_penalty(), -30);
    assert_eq!(report.result().raw_total(), 0);
    assert_eq!(report.result().percent(), 0);
    Ok(())
}

#[test]
fn tampered_reply_aborts_the_whole_score() -> Result<(), BlindScoreError> {
    let session = session()?;
    let Prepared::Pending(pending) = session.prepare("팀 협업", &ScoringPolicy::default())? else {
        panic!("expected an encrypted request");
    };

    let mut response = over_the_wire(pending.request())?;
    response.encrypted_contributions.pop();
    assert!(matches!(
        pending.finish(&session, &response),
        Err(BlindScoreError::Decryption(_))
    ));

    let mut response = over_the_wire(pending.request())?;
    response.encrypted_contributions[0] = "0".into();
    assert!(pending.finish(&session, &response).is_err());
    Ok(())
}

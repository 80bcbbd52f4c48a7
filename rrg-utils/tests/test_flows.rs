use rrg_utils::session::{
    AktionsartSession, AktionsartStep, Input, LogicalStructureSession, LogicalStructureStep,
    Transition,
};
use rrg_utils::{Aktionsart, FeatureVector, Language, classify};

fn answer<S>(
    session: &S,
    text: &str,
    step: impl Fn(&S, &Input) -> Result<Transition<S>, rrg_utils::session::SessionError>,
) -> Transition<S> {
    step(session, &Input::answer(text))
        .unwrap_or_else(|e| panic!("answer {text:?} was rejected: {e}"))
}

#[test]
fn test_broken_vase_end_to_end() {
    let mut session = AktionsartSession::new(Language::Spanish);
    let mut notices = Vec::new();
    for text in [
        "Juan rompió el jarrón",
        "Juan hizo que el jarrón se rompiera",
        "s",
        "el jarrón se rompió",
        "s",
        "romperse",
        "rompiendo",
        "roto",
        "el jarrón",
        "0",
        "3s",
        "n",
        "n",
        "n",
    ] {
        let transition = answer(&session, text, AktionsartSession::step);
        notices.extend(transition.notice);
        session = transition.session;
    }

    assert_eq!(
        session.step,
        AktionsartStep::Result(Aktionsart::CausativeAchievement)
    );
    assert_eq!(
        notices,
        vec![
            "El predicado es [+causativo]",
            "El predicado es [-estativo]",
            "El predicado es [+puntual]",
            "El predicado es [+télico]",
            "El predicado es [-dinámico]",
        ]
    );

    let prompt = session.prompt().unwrap();
    assert_eq!(
        prompt.lines[0],
        "El aktionsart del predicado de «Juan rompió el jarrón» es LOGRO CAUSATIVO."
    );
    assert_eq!(
        session.feature_vector().map(|features| classify(&features)),
        Some(Aktionsart::CausativeAchievement)
    );

    let session = answer(&session, "s", AktionsartSession::step).session;
    let handoff = session.handoff().unwrap();
    assert_eq!(handoff.clause, "Juan rompió el jarrón");
    assert!(!handoff.dynamic);

    let mut structure = LogicalStructureSession::from_handoff(Language::Spanish, handoff);
    assert_eq!(structure.step, LogicalStructureStep::ArgX);
    for text in ["Juan", "el jarrón", "", "romper"] {
        structure = answer(&structure, text, LogicalStructureSession::step).session;
    }
    assert_eq!(structure.step, LogicalStructureStep::Intentional);

    let transition = answer(&structure, "n", LogicalStructureSession::step);
    assert_eq!(
        transition.notice.as_deref(),
        Some("Estructura lógica del núcleo: [do' (Juan, Ø)] CAUSE [INGR romper' (el jarrón)]")
    );
    let structure = answer(&transition.session, "n", LogicalStructureSession::step).session;
    assert!(structure.is_finished());
    assert_eq!(
        structure.structure().unwrap().to_string(),
        "[do' (Juan, Ø)] CAUSE [INGR romper' (el jarrón)]"
    );
}

#[test]
fn test_remaining_tests_use_the_basic_event() {
    let mut session = AktionsartSession::new(Language::Spanish);
    for text in [
        "Juan rompió el jarrón",
        "Juan hizo que el jarrón se rompiera",
        "s",
        "el jarrón se rompió",
    ] {
        session = answer(&session, text, AktionsartSession::step).session;
    }
    assert_eq!(session.step, AktionsartStep::Stativity);
    assert_eq!(session.clause, "el jarrón se rompió");
    assert_eq!(session.original_clause, "Juan rompió el jarrón");
    let prompt = session.prompt().unwrap();
    assert_eq!(
        prompt.lines.last().map(String::as_str),
        Some("—El jarrón se rompió.")
    );

    // Going back past the basic event restores the clause as typed.
    let back = session.step(&Input::Back).unwrap().session;
    assert_eq!(back.step, AktionsartStep::BasicEvent);
    assert_eq!(back.clause, "Juan rompió el jarrón");
    assert_eq!(back.features.causative, None);
}

#[test]
fn test_session_survives_a_json_hop() {
    // The web front end keeps the session on the client between requests.
    let session = AktionsartSession::new(Language::English);
    let session = answer(&session, "John ran", AktionsartSession::step).session;
    let json = serde_json::to_string(&session).unwrap();
    let restored: AktionsartSession = serde_json::from_str(&json).unwrap();

    let transition = answer(&restored, "0", AktionsartSession::step);
    assert_eq!(transition.notice.as_deref(), Some("Predicate is [-causative]"));
    assert_eq!(transition.session.step, AktionsartStep::Stativity);

    // Going back after the hop still works because the history travels too.
    let back = transition.session.step(&Input::Back).unwrap().session;
    assert_eq!(back.step, AktionsartStep::Paraphrase);
}

#[test]
fn test_english_activity_flow() {
    let mut session = AktionsartSession::new(Language::English);
    for text in [
        "Peter ran in the park",
        "0",
        "y",
        "running",
        "run",
        "Peter",
        "in the park",
        "3s",
        "y",
        "y",
        "y",
    ] {
        session = answer(&session, text, AktionsartSession::step).session;
    }
    assert_eq!(session.aktionsart(), Some(Aktionsart::Activity));
    assert_eq!(
        session.feature_vector(),
        Some(FeatureVector {
            causative: false,
            stative: false,
            punctual: false,
            telic: false,
            dynamic: true,
        })
    );
}

use crate::form::rules::{check, FieldErrors, FieldRule};
use crate::model::RecordDraft;

const RECORD_RULES: [FieldRule; 9] = [
    FieldRule::required("observationTitle", "Title", 256),
    FieldRule::required("observationSubject", "Subject", 256),
    FieldRule::required_unbounded("discussion", "Discussion"),
    FieldRule::required_unbounded("conclusion", "Conclusion"),
    FieldRule::required_unbounded("initialRecommendation", "Initial recommendation"),
    FieldRule::required("type", "Type", 64),
    FieldRule::required("originatingMainUnit", "Originating main unit", 128),
    FieldRule::required("originatingSubunit", "Originating subunit", 128),
    FieldRule::required("currentAssignment", "Current assignment", 128),
];

/// Client-side checks run before a record is created or updated.
pub fn validate_record(draft: &RecordDraft) -> Result<(), FieldErrors> {
    let values = [
        ("observationTitle", draft.observation_title.as_str()),
        ("observationSubject", draft.observation_subject.as_str()),
        ("discussion", draft.discussion.as_str()),
        ("conclusion", draft.conclusion.as_str()),
        ("initialRecommendation", draft.initial_recommendation.as_str()),
        ("type", draft.record_type.as_str()),
        ("originatingMainUnit", draft.originating_main_unit.as_str()),
        ("originatingSubunit", draft.originating_subunit.as_str()),
        ("currentAssignment", draft.current_assignment.as_str()),
    ];
    check(&RECORD_RULES, &values).into_result()
}

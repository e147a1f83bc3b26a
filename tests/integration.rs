//! Integration tests for Keiro
//!
//! End-to-end tests that verify the complete functionality works together.
//!
mod common;
use common::*;
use keiro::prelude::*;

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_welcome_scenario_survives_serialization() {
        let mut graph = create_welcome_graph();
        graph.relayout();

        let json = to_json(&graph).expect("Failed to encode sequence");
        let import = from_json(&json, &ImportOptions::default()).expect("Failed to decode");

        assert!(import.is_clean(), "Warnings: {:?}", import.warnings);
        let restored = import.graph;
        assert_eq!(restored.len(), 4);

        assert_eq!(variable_names(&restored, "a-welcome"), vec!["first_name"]);
        assert_eq!(variable_names(&restored, "c-call"), vec!["name"]);
        assert!(variable_names(&restored, "d-follow").is_empty());
        assert!(variable_names(&restored, "b-opened").is_empty());

        let opened = restored.connections("b-opened").unwrap();
        assert_eq!(opened.yes, Some("c-call".into()));
        assert_eq!(opened.no, Some("d-follow".into()));
        assert_eq!(
            restored.node("b-opened").unwrap().schedule(),
            Schedule::new(2, DelayUnit::Days)
        );
    }

    #[test]
    fn test_edit_session_end_to_end() {
        let mut session = EditSession::default();

        let request = session.open_add_step(None).unwrap();
        let intro = session.complete_add_step(request, ActionType::Email).unwrap();
        session
            .update_content(
                intro.as_str(),
                ContentPatch {
                    subject: Some("Hello {{firstName}}".to_string()),
                    message: Some("Saw {{companyName}} is hiring.".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        let request = session
            .open_add_step(Some(ParentLink::main(intro.clone())))
            .unwrap();
        let check = session
            .complete_add_step(request, ConditionType::EmailReply)
            .unwrap();

        let request = session
            .open_add_step(Some(ParentLink::no(check.clone())))
            .unwrap();
        let nudge = session
            .complete_add_step(request, ActionType::LinkedinMessage)
            .unwrap();
        assert!(session.insert_variable(nudge.as_str(), "name", TemplateField::Message));

        session.relayout().unwrap();
        let saved = session.save();
        assert_eq!(saved.len(), 3);

        let restored = from_flat(saved, &ImportOptions::default());
        assert!(restored.is_clean());
        assert_eq!(
            variable_names(&restored.graph, intro.as_str()),
            vec!["first_name", "company"]
        );
        assert_eq!(
            restored.graph.child(check.as_str(), Branch::No).unwrap().id(),
            &nudge
        );
        assert!(restored.graph.child(check.as_str(), Branch::Yes).is_none());
    }

    #[test]
    fn test_outline_of_welcome_graph() {
        let graph = create_welcome_graph();

        let outline = OutlineFormatter::format(&graph);

        let expected = [
            "a-welcome: email \"Welcome\" [first_name]",
            "└─ b-opened: email-opened (after 2 days)",
            "   ├─ yes: c-call: manual-task \"Call {{name}}\" [name]",
            "   └─ no: d-follow: email \"Follow up\"",
        ]
        .join("\n");
        assert_eq!(outline, expected);
    }

    #[test]
    fn test_outline_lists_orphans_as_roots() {
        let mut graph = create_branching_graph();
        graph.remove_node("intro").unwrap();

        let outline = OutlineFormatter::format(&graph);
        let first_line = outline.lines().next().unwrap();

        assert_eq!(first_line, "check: linkedin-connection-check");
        assert_eq!(outline.lines().count(), 3);
    }

    #[test]
    fn test_loads_stored_sequence_json() {
        let import = from_json(STORED_SEQUENCE_JSON, &ImportOptions::default())
            .expect("Failed to load stored sequence");

        assert!(import.is_clean(), "Warnings: {:?}", import.warnings);
        assert_eq!(import.graph.len(), 3);
        assert_eq!(
            import.graph.node("visit").unwrap().position(),
            Position::new(250.0, 50.0)
        );
        assert_eq!(variable_names(&import.graph, "invite"), vec!["first_name"]);
        assert!(import.graph.validate().is_empty());
    }

    const STORED_SEQUENCE_JSON: &str = r#"[
        {
            "id": "invite",
            "stepType": "linkedin-invitation",
            "parentId": "has-li",
            "parentBranch": "yes",
            "x": 600,
            "y": 200,
            "content": {
                "message": "Hi {{first-name}}, let's connect",
                "linkedinAccount": "acct-1",
                "delay": 1,
                "delayUnit": "days"
            }
        },
        {
            "id": "visit",
            "stepType": "linkedin-visit",
            "x": 250,
            "y": 50,
            "content": { "delay": 0, "delayUnit": "days" }
        },
        {
            "id": "has-li",
            "stepType": "has-linkedin",
            "parentId": "visit",
            "parentBranch": "main",
            "x": 300,
            "y": 125,
            "content": { "delay": 0, "delayUnit": "minutes" }
        }
    ]"#;
}

/*!
 * Batch processing and decision handling tests
 */

use std::fs;
use std::path::PathBuf;

use subtitle_sanitizer::app_config::Config;
use subtitle_sanitizer::app_controller::{
    Controller, Decision, DecisionProvider, FixedDecision, SanitizedFile,
};

use crate::common;

/// Plays back a scripted list of answers and remembers what it was asked
struct ScriptedDecision {
    answers: Vec<Decision>,
    seen: Vec<PathBuf>,
}

impl DecisionProvider for ScriptedDecision {
    fn decide(&mut self, file: &SanitizedFile) -> Decision {
        self.seen.push(file.input.clone());
        if self.answers.is_empty() {
            Decision::Skip
        } else {
            self.answers.remove(0)
        }
    }
}

#[test]
fn test_runBatch_withApply_shouldWriteEveryFile() {
    let temp_dir = common::create_temp_dir().unwrap();
    let a = common::create_test_subtitle(temp_dir.path(), "a.srt").unwrap();
    let b = common::create_test_subtitle(temp_dir.path(), "b.srt").unwrap();
    let controller = Controller::with_config(Config::default());

    let summary = controller.run_batch(&[a, b], &mut FixedDecision(Decision::Apply));

    assert_eq!(summary.written.len(), 2);
    assert_eq!(summary.failed, 0);
    assert!(!summary.aborted);
    let output = fs::read_to_string(temp_dir.path().join("a.sanitized.srt")).unwrap();
    assert_eq!(
        output,
        "1\n00:00:01,000 --> 00:00:04,000\nHello\n\n2\n00:00:10,000 --> 00:00:14,000\nFor testing purposes.\n"
    );
}

#[test]
fn test_runBatch_withSkip_shouldWriteNothing() {
    let temp_dir = common::create_temp_dir().unwrap();
    let a = common::create_test_subtitle(temp_dir.path(), "a.srt").unwrap();
    let controller = Controller::with_config(Config::default());

    let summary = controller.run_batch(&[a], &mut FixedDecision(Decision::Skip));

    assert_eq!(summary.skipped, 1);
    assert!(summary.written.is_empty());
    assert!(!temp_dir.path().join("a.sanitized.srt").exists());
}

#[test]
fn test_runBatch_withExistingOutput_shouldRespectOverwriteChoice() {
    let temp_dir = common::create_temp_dir().unwrap();
    let a = common::create_test_subtitle(temp_dir.path(), "a.srt").unwrap();
    let existing = common::create_test_file(temp_dir.path(), "a.sanitized.srt", "old").unwrap();
    let controller = Controller::with_config(Config::default());

    let applied = controller.run_batch(&[a.clone()], &mut FixedDecision(Decision::Apply));
    assert_eq!(applied.written, vec![temp_dir.path().join("a.sanitized_1.srt")]);
    assert_eq!(fs::read_to_string(&existing).unwrap(), "old");

    let overwritten = controller.run_batch(&[a], &mut FixedDecision(Decision::Overwrite));
    assert_eq!(overwritten.written, vec![existing.clone()]);
    assert_ne!(fs::read_to_string(&existing).unwrap(), "old");
}

#[test]
fn test_runBatch_withQuit_shouldStopBeforeRemainingFiles() {
    let temp_dir = common::create_temp_dir().unwrap();
    let a = common::create_test_subtitle(temp_dir.path(), "a.srt").unwrap();
    let b = common::create_test_subtitle(temp_dir.path(), "b.srt").unwrap();
    let c = common::create_test_subtitle(temp_dir.path(), "c.srt").unwrap();
    let controller = Controller::with_config(Config::default());
    let mut decider = ScriptedDecision {
        answers: vec![Decision::Apply, Decision::Quit, Decision::Apply],
        seen: Vec::new(),
    };

    let summary = controller.run_batch(&[a.clone(), b.clone(), c], &mut decider);

    assert!(summary.aborted);
    assert_eq!(summary.written.len(), 1);
    assert_eq!(decider.seen, vec![a, b]);
    assert!(!temp_dir.path().join("c.sanitized.srt").exists());
}

#[test]
fn test_runBatch_withFailingFile_shouldContinueWithNext() {
    let temp_dir = common::create_temp_dir().unwrap();
    let empty = common::create_test_file(temp_dir.path(), "empty.srt", "").unwrap();
    let good = common::create_test_subtitle(temp_dir.path(), "good.srt").unwrap();
    let missing = temp_dir.path().join("missing.srt");
    let controller = Controller::with_config(Config::default());
    let mut decider = ScriptedDecision {
        answers: vec![Decision::Apply],
        seen: Vec::new(),
    };

    let summary = controller.run_batch(&[empty, missing, good.clone()], &mut decider);

    assert_eq!(summary.failed, 2);
    assert_eq!(summary.written, vec![temp_dir.path().join("good.sanitized.srt")]);
    assert_eq!(decider.seen, vec![good]);
}

#[test]
fn test_collectInputs_withDirectory_shouldExpandAndKeepFiles() {
    let temp_dir = common::create_temp_dir().unwrap();
    let sub_dir = temp_dir.path().join("show");
    fs::create_dir(&sub_dir).unwrap();
    common::create_test_subtitle(&sub_dir, "e01.srt").unwrap();
    common::create_test_file(&sub_dir, "e02.ass", "[Events]\n").unwrap();
    common::create_test_file(&sub_dir, "e01.sanitized.srt", "x").unwrap();
    let loose = temp_dir.path().join("loose.srt");

    let inputs = Controller::collect_inputs(&[sub_dir.clone(), loose.clone()]).unwrap();

    assert_eq!(inputs, vec![sub_dir.join("e01.srt"), sub_dir.join("e02.ass"), loose]);
}

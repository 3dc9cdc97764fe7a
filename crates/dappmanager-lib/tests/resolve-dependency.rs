use std::collections::BTreeMap;

use dappmanager::dappget;
use dappmanager::dappget::DappGetRequest;
use dappmanager::dappget::DappGetResult;
use dappmanager::registry::Sources;
use dappmanager::registry::Version;
use dappmanager::DappGetOptions;
use dappmanager_test_utils::TestRepo;

fn request(name: &str, range: &str) -> DappGetRequest {
	DappGetRequest { name: name.to_string(), version_range: range.to_string() }
}

fn solve(repo: &TestRepo, name: &str, range: &str) -> DappGetResult {
	let _ = env_logger::builder().is_test(true).try_init();
	let sources = Sources::from_repo(repo);
	dappget::resolve(&request(name, range), &sources, &DappGetOptions::default()).expect("resolve failed")
}

fn solved_state(result: DappGetResult) -> BTreeMap<String, Version> {
	match result {
		DappGetResult::Solved(solution) => solution.state,
		DappGetResult::Unsolvable { message, .. } => panic!("expected a solution, got: {}", message),
	}
}

#[test]
fn upgrade_propagates_to_installed_dependents() {
	let repo = TestRepo::new()
		.package("A", "1.0.0", r#"{"C": "^1.0.0"}"#)
		.package("A", "2.0.0", r#"{"C": "^2.0.0"}"#)
		.package("B", "1.0.0", r#"{"C": "^1.0.0"}"#)
		.package("B", "2.0.0", r#"{"C": "^2.0.0"}"#)
		.package("C", "1.0.0", "{}")
		.package("C", "2.0.0", "{}")
		.installed("A", "1.0.0")
		.installed("B", "1.0.0")
		.installed("C", "1.0.0");

	let state = solved_state(solve(&repo, "A", "^2.0.0"));
	assert_eq!(state.get("A"), Some(&Version::parse("2.0.0")));
	assert_eq!(state.get("B"), Some(&Version::parse("2.0.0")));
	assert_eq!(state.get("C"), Some(&Version::parse("2.0.0")));
}

#[test]
fn prefers_leaving_optional_packages_out() {
	let repo = TestRepo::new()
		.package("A", "0.1.0", "{}")
		.package("A", "0.1.1", r#"{"B": "^1.0.0"}"#)
		.package("A", "0.1.2", "{}")
		.package("B", "1.0.0", "{}")
		.installed("A", "0.1.0");

	let state = solved_state(solve(&repo, "A", "^0.1.1"));
	assert_eq!(state.get("A"), Some(&Version::parse("0.1.2")));
	assert!(!state.contains_key("B"), "B should never be installed");
}

#[test]
fn circular_dependencies_resolve() {
	let repo = TestRepo::new()
		.package("dnp-a", "0.1.0", r#"{"dnp-b": "0.1.0"}"#)
		.package("dnp-b", "0.1.0", r#"{"dnp-c": "0.1.0"}"#)
		.package("dnp-c", "0.1.0", r#"{"dnp-a": "0.1.0"}"#);

	let state = solved_state(solve(&repo, "dnp-a", "0.1.0"));
	assert_eq!(state.get("dnp-a"), Some(&Version::parse("0.1.0")));
	assert_eq!(state.get("dnp-b"), Some(&Version::parse("0.1.0")));
	assert_eq!(state.get("dnp-c"), Some(&Version::parse("0.1.0")));
}

#[test]
fn unsolvable_state_blames_the_shared_dependency() {
	/* X and Y are both installed and pin D to disjoint majors, so any
	 * version of D breaks one of them. */
	let repo = TestRepo::new()
		.package("D", "1.0.0", "{}")
		.package("D", "2.0.0", "{}")
		.package("X", "1.0.0", r#"{"D": "^1.0.0"}"#)
		.package("Y", "1.0.0", r#"{"D": "^2.0.0"}"#)
		.installed("X", "1.0.0")
		.installed("Y", "1.0.0");

	match solve(&repo, "D", "^2.0.0") {
		DappGetResult::Unsolvable { message, stats } => {
			assert!(message.contains("incompatible versions of D"), "{}", message);
			assert!(message.contains("X") && message.contains("Y"), "{}", message);
			assert_eq!(stats.cases_checked, stats.total_cases);
			assert!(!stats.timed_out);
		}
		DappGetResult::Solved(solution) => panic!("expected failure, got {:?}", solution.state),
	}
}

#[test]
fn identical_inputs_resolve_identically() {
	let repo = TestRepo::new()
		.package("A", "1.0.0", r#"{"B": "*"}"#)
		.package("B", "1.0.0", "{}")
		.package("B", "1.1.0", "{}")
		.package("B", "2.0.0", "{}");

	let first = solved_state(solve(&repo, "A", "^1.0.0"));
	let second = solved_state(solve(&repo, "A", "^1.0.0"));
	assert_eq!(first, second);
}

#[test]
fn solved_states_satisfy_every_dependency() {
	let repo = TestRepo::new()
		.package("A", "1.0.0", r#"{"B": "^1.0.0", "C": "^1.0.0"}"#)
		.package("B", "1.0.0", r#"{"C": "^1.0.0"}"#)
		.package("C", "1.0.0", "{}")
		.package("C", "1.1.0", "{}");

	let state = solved_state(solve(&repo, "A", "^1.0.0"));
	assert!(state.contains_key("A"));
	assert!(state.contains_key("B"));
	assert!(state.contains_key("C"));
}

#[test]
fn request_for_an_unknown_version_is_an_input_error() {
	let repo = TestRepo::new().package("A", "1.0.0", "{}");
	let sources = Sources::from_repo(&repo);
	let result = dappget::resolve(&request("A", "^5.0.0"), &sources, &DappGetOptions::default());
	assert!(result.is_err());
}

#[test]
fn malformed_request_range_is_an_input_error() {
	let repo = TestRepo::new().package("A", "1.0.0", "{}");
	let sources = Sources::from_repo(&repo);
	let result = dappget::resolve(&request("A", "not a version"), &sources, &DappGetOptions::default());
	assert!(result.is_err());
}

#[test]
fn content_hash_requests_resolve_to_the_hash() {
	let repo = TestRepo::new().package("A", "1.0.0", "{}");
	let hash = "/ipfs/QmP1nDAPirEgUM5J1BavQrQEjgQUpTN1DXLnQV3t2EoFFT";

	let state = solved_state(solve(&repo, "A", hash));
	assert_eq!(state.get("A"), Some(&Version::parse(hash)));
}

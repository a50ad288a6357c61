use tempfile::TempDir;

use super::*;

fn session(id: &str, client_name: Option<&str>) -> Session {
	Session {
		api_url: "https://host/".into(),
		instance_token: format!("token-{id}"),
		instance_id: id.into(),
		instance_name: "Main".into(),
		version: "1.2.0".into(),
		client_name: client_name.map(String::from),
	}
}

fn exercise_contract(store: &dyn TokenStore) {
	assert_eq!(store.read(TokenField::ApiUrl), None);
	assert_eq!(store.read_session(), None);

	let first = session("abc", Some("evolution"));
	store.save(&first).unwrap();
	for (field, value) in first.entries() {
		assert_eq!(store.read(field).as_deref(), Some(value), "field {field}");
	}
	assert_eq!(store.read_session(), Some(first));

	// wholesale overwrite: the optional field from the first session must not survive
	let second = session("def", None);
	store.save(&second).unwrap();
	assert_eq!(store.read(TokenField::InstanceId).as_deref(), Some("def"));
	assert_eq!(store.read(TokenField::ClientName), None);

	store.clear().unwrap();
	for field in TokenField::ALL {
		assert_eq!(store.read(field), None);
	}
	store.clear().unwrap();
}

#[test]
fn memory_store_honours_contract() {
	exercise_contract(&MemoryTokenStore::new());
}

#[test]
fn file_store_honours_contract() {
	let tmp = TempDir::new().expect("temp dir should be created");
	exercise_contract(&FileTokenStore::new(tmp.path().join("state").join("session.json")));
}

#[test]
fn memory_store_keeps_empty_values_distinct_from_absent() {
	let store = MemoryTokenStore::with_fields([(TokenField::ApiUrl, "")]);
	assert_eq!(store.read(TokenField::ApiUrl).as_deref(), Some(""));
	assert_eq!(store.read(TokenField::InstanceId), None);
}

#[test]
fn file_store_writes_schema_keys() {
	let tmp = TempDir::new().expect("temp dir should be created");
	let path = tmp.path().join("session.json");
	let store = FileTokenStore::new(&path);
	store.save(&session("abc", None)).unwrap();

	let raw: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
	assert_eq!(raw["apiUrl"], "https://host/");
	assert_eq!(raw["instanceToken"], "token-abc");
	assert_eq!(raw["instanceId"], "abc");
	assert_eq!(raw["instanceName"], "Main");
	assert_eq!(raw["version"], "1.2.0");
	assert!(raw.get("clientName").is_none());
	let names: Vec<_> = std::fs::read_dir(tmp.path()).unwrap().map(|entry| entry.unwrap().file_name()).collect();
	assert_eq!(names, ["session.json"], "staging file should be renamed away");
}

#[test]
fn file_store_reads_malformed_file_as_absent() {
	let tmp = TempDir::new().expect("temp dir should be created");
	let path = tmp.path().join("session.json");
	std::fs::write(&path, "{not json").unwrap();

	let store = FileTokenStore::new(&path);
	assert_eq!(store.read(TokenField::ApiUrl), None);
	assert_eq!(store.read_session(), None);
	store.clear().unwrap();
	assert!(!path.exists());
}

#[test]
fn file_store_reads_partial_file_per_field() {
	let tmp = TempDir::new().expect("temp dir should be created");
	let path = tmp.path().join("session.json");
	std::fs::write(&path, r#"{"apiUrl":"https://host","instanceId":"abc"}"#).unwrap();

	let store = FileTokenStore::new(&path);
	assert_eq!(store.read(TokenField::InstanceId).as_deref(), Some("abc"));
	assert_eq!(store.read(TokenField::InstanceToken), None);
	assert_eq!(store.read_session(), None);
}

#[test]
fn file_store_skips_non_string_values() {
	let tmp = TempDir::new().expect("temp dir should be created");
	let path = tmp.path().join("session.json");
	std::fs::write(
		&path,
		r#"{"apiUrl":"https://host/","instanceToken":"tok1","instanceId":"abc","instanceName":"Main","version":"2.2.3","clientName":null,"extra":7}"#,
	)
	.unwrap();

	let store = FileTokenStore::new(&path);
	assert_eq!(store.read(TokenField::ApiUrl).as_deref(), Some("https://host/"));
	assert_eq!(store.read(TokenField::ClientName), None);
	assert_eq!(store.read_session().map(|s| s.instance_id), Some("abc".to_string()));
}

#[test]
fn file_store_concurrent_saves_never_tear() {
	let tmp = TempDir::new().expect("temp dir should be created");
	let store = FileTokenStore::new(tmp.path().join("session.json"));
	store.save(&session("seed", None)).unwrap();

	std::thread::scope(|scope| {
		for worker in 0..4 {
			let store = &store;
			scope.spawn(move || {
				for round in 0..100 {
					let id = format!("w{worker}-{round}");
					store.save(&session(&id, Some("evolution"))).expect("concurrent save should succeed");
					assert!(store.read_session().is_some(), "a complete session was already stored");
				}
			});
		}
	});

	let last = store.read_session().expect("session should survive");
	assert_eq!(last.instance_token, format!("token-{}", last.instance_id));
	let names: Vec<_> = std::fs::read_dir(tmp.path()).unwrap().map(|entry| entry.unwrap().file_name()).collect();
	assert_eq!(names, ["session.json"]);
}

use addrbox::{
	ArgError, Family, IpAddress, ResolveError, ResolveHints, Resolver, SockKind, SystemResolver,
	is_domain_name, tokenize,
};

#[test]
fn domain_names() {
	for name in ["example.com", "example.com.", "a", "xn--bcher-kva.example", "my-host.lan", "_dmarc.example.org"] {
		assert!(is_domain_name(name), "{:?}", name);
	}

	let long_label = format!("{}.com", "a".repeat(64));
	let long_name = vec!["abcdefghi"; 26].join(".");
	for name in ["", ".", "example..com", "-bad.com", "bad-.com", "spa ce.com", "host:80", long_label.as_str(), long_name.as_str()] {
		assert!(!is_domain_name(name), "{:?}", name);
	}
}

#[test]
fn resolves_numeric_v4() {
	let hints = ResolveHints::new().numeric_host(true).socktype(SockKind::Stream);
	let addrs = SystemResolver::new().resolve("192.0.2.10", Some("8080"), &hints).unwrap();
	assert_eq!(addrs.len(), 1);

	let mut expected = IpAddress::from_text("192.0.2.10").unwrap();
	expected.set_port(8080);
	assert_eq!(addrs[0], expected);
}

#[test]
fn resolves_numeric_v6() {
	let hints = ResolveHints::new()
		.family(Family::V6)
		.numeric_host(true)
		.socktype(SockKind::Datagram);
	let addrs = SystemResolver::new().resolve("::1", None, &hints).unwrap();
	assert_eq!(addrs, vec![IpAddress::loopback(Family::V6)]);
}

#[test]
fn numeric_host_rejects_names() {
	let hints = ResolveHints::new().numeric_host(true);
	match SystemResolver::new().resolve("not-an-address", None, &hints) {
		Err(ResolveError::Lookup { host, code, message }) => {
			assert_eq!(host, "not-an-address");
			assert_eq!(code, libc::EAI_NONAME);
			assert!(!message.is_empty());
		}
		other => panic!("unexpected result {:?}", other),
	}
}

#[test]
fn family_mismatch_is_an_error() {
	let hints = ResolveHints::new().numeric_host(true).family(Family::V4);
	assert!(SystemResolver::new().resolve("2001:db8::1", None, &hints).is_err());
}

#[test]
fn nul_in_host() {
	let err = SystemResolver::new()
		.resolve("local\0host", None, &ResolveHints::new())
		.unwrap_err();
	assert!(matches!(err, ResolveError::InvalidInput { .. }));

	let err: std::io::Error = err.into();
	assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
}

#[test]
fn resolver_is_object_safe() {
	struct Fixed(Vec<IpAddress>);

	impl Resolver for Fixed {
		fn resolve(&self, _: &str, _: Option<&str>, _: &ResolveHints) -> Result<Vec<IpAddress>, ResolveError> {
			Ok(self.0.clone())
		}
	}

	let resolvers: Vec<Box<dyn Resolver>> = vec![
		Box::new(Fixed(vec![IpAddress::loopback(Family::V4)])),
		Box::new(SystemResolver::new()),
	];
	let hints = ResolveHints::new().numeric_host(true).socktype(SockKind::Stream);
	for resolver in &resolvers {
		let addrs = resolver.resolve("127.0.0.1", None, &hints).unwrap();
		assert_eq!(addrs, vec![IpAddress::loopback(Family::V4)]);
	}
}

#[test]
fn tokenizer() {
	assert_eq!(
		tokenize("ip route add 10.0.0.0/8 via '192.0.2.1'").unwrap(),
		vec!["ip", "route", "add", "10.0.0.0/8", "via", "192.0.2.1"]
	);
	assert_eq!(tokenize(r#"echo "a \"quoted\" word""#).unwrap(), vec!["echo", r#"a "quoted" word"#]);
	assert_eq!(tokenize(""), Ok(Vec::new()));
	assert_eq!(tokenize("say 'oops"), Err(ArgError::Unbalanced));
}

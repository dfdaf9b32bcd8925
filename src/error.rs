/// Address conversion errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddrError {
	#[error("unsupported address family {family}")]
	InvalidFamily { family: i32 },

	#[error("text buffer of {available} bytes is too small")]
	BufferTooSmall { available: usize },

	#[error("invalid address literal {input:?}")]
	Parse { input: String },

	#[error("address has no IPv4 representation")]
	NotRepresentable,
}

/// Name resolution errors.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
	#[error("invalid resolver input: {reason}")]
	InvalidInput { reason: &'static str },

	#[error("getaddrinfo({host}) failed: {message} (code {code})")]
	Lookup { host: String, code: i32, message: String },

	#[error("getaddrinfo() failed: {}", errno_to_str(*.errno))]
	System { errno: i32 },
}

/// Command line tokenizer errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgError {
	#[error("unbalanced quoting in command line")]
	Unbalanced,
}

/// Returns current errno value.
#[inline]
pub fn errno() -> i32 {
	std::io::Error::last_os_error().raw_os_error().unwrap_or(0)
}

/// Converts errno to human-readable string.
fn errno_to_str(errno: i32) -> String {
	match errno {
		libc::EAFNOSUPPORT => "address family not supported".into(),
		libc::EAGAIN => "resource temporarily unavailable".into(),
		libc::EINTR => "interrupted by signal".into(),
		libc::EINVAL => "invalid argument".into(),
		libc::EMFILE => "too many open files".into(),
		libc::ENOMEM => "out of memory".into(),
		libc::ENOSPC => "no space left".into(),
		_ => format!("errno {}", errno),
	}
}

/// Maps errno to std::io::ErrorKind.
fn errno_to_kind(errno: i32) -> std::io::ErrorKind {
	match errno {
		libc::EAGAIN => std::io::ErrorKind::WouldBlock,
		libc::EINTR => std::io::ErrorKind::Interrupted,
		libc::EINVAL | libc::EAFNOSUPPORT => std::io::ErrorKind::InvalidInput,
		libc::ENOMEM => std::io::ErrorKind::OutOfMemory,
		_ => std::io::ErrorKind::Other,
	}
}

impl From<AddrError> for std::io::Error {
	fn from(err: AddrError) -> Self {
		let kind = match &err {
			AddrError::InvalidFamily { .. } => errno_to_kind(libc::EAFNOSUPPORT),
			AddrError::BufferTooSmall { .. } => std::io::ErrorKind::InvalidInput,
			AddrError::Parse { .. } => std::io::ErrorKind::InvalidInput,
			AddrError::NotRepresentable => std::io::ErrorKind::AddrNotAvailable,
		};
		std::io::Error::new(kind, err)
	}
}

impl From<ResolveError> for std::io::Error {
	fn from(err: ResolveError) -> Self {
		let kind = match &err {
			ResolveError::InvalidInput { .. } => std::io::ErrorKind::InvalidInput,
			ResolveError::Lookup { code, .. } if *code == libc::EAI_AGAIN => std::io::ErrorKind::WouldBlock,
			ResolveError::Lookup { code, .. } if *code == libc::EAI_MEMORY => std::io::ErrorKind::OutOfMemory,
			ResolveError::Lookup { .. } => std::io::ErrorKind::NotFound,
			ResolveError::System { errno } => errno_to_kind(*errno),
		};
		std::io::Error::new(kind, err)
	}
}

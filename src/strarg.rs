//! Command line splitting.

use log::trace;

use crate::error::ArgError;

/// Splits `command` into arguments the way a POSIX shell would.
///
/// Single quotes, double quotes and backslash escapes are honoured; no
/// expansion of any kind is performed. An empty or blank command yields no
/// arguments.
pub fn tokenize(command: &str) -> Result<Vec<String>, ArgError> {
	let args = shlex::split(command).ok_or(ArgError::Unbalanced)?;
	trace!("tokenize({:?}) -> {:?}", command, args);
	Ok(args)
}

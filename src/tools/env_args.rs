#[cfg(not(test))]
use std::env;
#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::collections::HashMap;
use std::ops::Deref;

// region ArgName
/// Simple wrapper around a collection of strings.
/// Can be constructed automatically from &str & Vec<&str>.
/// Useful to handle args which can have multiple names and those which can have no more than one name.
pub struct ArgName<'a> {
    names: Vec<&'a str>,
}
impl<'a> From<&'a str> for ArgName<'a> {
    fn from(val: &'a str) -> Self {
        ArgName { names: vec![val] }
    }
}

impl<'a> From<Vec<&'a str>> for ArgName<'a> {
    fn from(val: Vec<&'a str>) -> Self {
        ArgName { names: val }
    }
}

impl<'a> Deref for ArgName<'a> {
    type Target = Vec<&'a str>;

    fn deref(&self) -> &Self::Target {
        &self.names
    }
}
// endregion

/// Retrieve value associated to an arg passed to the app.
///
/// /!\ As this works on global variables,
/// a function using `retrieve_arg_value` could be tricky to test.
/// To do so, wrap your test with `with_env_args(args, fn)`.
/// This function is only available in a test context.
pub fn retrieve_arg_value<'a, A>(arg_names: A) -> Option<String>
where
    A: Into<ArgName<'a>>,
{
    let args: Vec<String> = get_env_args();
    let arg_names = arg_names.into();
    for arg in args {
        for arg_name in arg_names.iter() {
            let arg_prefix = format!("{arg_name}=");
            if arg.starts_with(&arg_prefix) {
                return arg.split_once("=").map(|(_, l)| l.to_owned());
            }
        }
    }

    None
}

/// Retrieve a setting, first from the args passed to the app, then from the environment.
/// Empty values are considered missing.
///
/// Environment variables can be set up in tests with `with_env_vars(vars, fn)`.
pub fn retrieve_setting<'a, A>(arg_names: A, env_var: &str) -> Option<String>
where
    A: Into<ArgName<'a>>,
{
    retrieve_arg_value(arg_names)
        .filter(|value| !value.trim().is_empty())
        .or_else(|| get_env_var(env_var).filter(|value| !value.trim().is_empty()))
}

/// Retrieve a setting that the app can't go without.
pub fn retrieve_expected_setting<'a, A, E>(
    arg_names: A,
    env_var: &str,
    error_if_missing: E,
) -> Result<String, E>
where
    A: Into<ArgName<'a>>,
{
    retrieve_setting(arg_names, env_var).ok_or(error_if_missing)
}

#[cfg(not(test))]
fn get_env_args() -> Vec<String> {
    env::args().collect()
}

#[cfg(not(test))]
fn get_env_var(name: &str) -> Option<String> {
    env::var(name).ok()
}

#[cfg(test)]
thread_local! {
    /// A mutable `Vec<String>` to host env args for tests.
    /// When a test is run with `with_env_args`,
    /// the inner `Vec` is set to whatever param is passed.
    /// It is then reset to its previous state.
    static ENV_ARGS: RefCell<Vec<String>> = const { RefCell::new(vec![]) };
}
#[cfg(test)]
fn get_env_args() -> Vec<String> {
    ENV_ARGS.with(|vec| vec.clone().into_inner())
}

#[cfg(test)]
thread_local! {
    /// Stands for the process environment, which is shared by every test thread.
    /// Set with `with_env_vars`, then reset to its previous state.
    static ENV_VARS: RefCell<HashMap<String, String>> = RefCell::new(HashMap::new());
}
#[cfg(test)]
fn get_env_var(name: &str) -> Option<String> {
    ENV_VARS.with(|vars| vars.borrow().get(name).cloned())
}

#[cfg(test)]
/// When running tests, env args are extended from within the app.
/// You can set them up from there by wrapping your test with this function.
pub fn with_env_args<F, T>(mut args: Vec<String>, function: F) -> T
where
    F: FnOnce() -> T,
{
    ENV_ARGS.with(|refcell| {
        let global_env_args = std::env::args().collect::<Vec<String>>();
        args.extend_from_slice(&global_env_args);
        let old_value = refcell.replace(args);
        let result = function();
        refcell.replace(old_value);
        result
    })
}

#[cfg(test)]
/// Run `function` as if the environment only held `vars`.
pub fn with_env_vars<F, T>(vars: HashMap<String, String>, function: F) -> T
where
    F: FnOnce() -> T,
{
    ENV_VARS.with(|refcell| {
        let old_value = refcell.replace(vars);
        let result = function();
        refcell.replace(old_value);
        result
    })
}

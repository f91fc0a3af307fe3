//! `import`, `load` and dynamic code.
//!
//! `import NAME` returns a host module; `load PATH` runs another script in
//! a fresh root chain and returns its global bindings as a module. The
//! `*all` variants bind every member into the caller's innermost namespace.
//! `exec` and `eval` run source text against the caller's scope chain.

use std::path::{Path, PathBuf};

use lagoon_ir::{Ident, SourceText};
use tracing::debug;

use super::modules::host_module;
use super::{seed, LAGOONFILE};
use crate::environment::ScopeChain;
use crate::errors::{self, EvalResult};
use crate::interpreter::Evaluator;
use crate::methods::str_arg;
use crate::value::{Args, ModuleValue, NativeFn, Value};

pub(super) const LOADERS: &[(&str, NativeFn)] = &[
    ("import", import),
    ("importall", importall),
    ("load", load),
    ("loadall", loadall),
    ("exec", exec),
    ("eval", eval),
];

/// `__interpreter__`: the loaders as members of one module.
pub(super) fn interpreter_module() -> Value {
    let mut module = ModuleValue::new("__interpreter__");
    for &(name, func) in LOADERS {
        module = module.with(name, Value::native(name, func));
    }
    Value::module(module)
}

fn import(_: &mut Evaluator<'_>, args: Args) -> EvalResult {
    let [name] = args.exact::<1>("import")?;
    find_module(str_arg("import", &name)?)
}

fn importall(ev: &mut Evaluator<'_>, args: Args) -> EvalResult {
    let [name] = args.exact::<1>("importall")?;
    let module = find_module(str_arg("importall", &name)?)?;
    bind_members(ev.chain(), &module);
    Ok(Value::None)
}

fn find_module(name: &str) -> EvalResult {
    debug!(module = name, "import");
    host_module(name).ok_or_else(|| errors::module_not_found(name))
}

fn load(ev: &mut Evaluator<'_>, args: Args) -> EvalResult {
    let [path] = args.exact::<1>("load")?;
    load_script(ev, str_arg("load", &path)?)
}

fn loadall(ev: &mut Evaluator<'_>, args: Args) -> EvalResult {
    let [path] = args.exact::<1>("loadall")?;
    let module = load_script(ev, str_arg("loadall", &path)?)?;
    bind_members(ev.chain(), &module);
    Ok(Value::None)
}

fn bind_members(chain: &ScopeChain, module: &Value) {
    if let Value::Module(module) = module {
        for (name, value) in module.members() {
            chain.assign(name, value);
        }
    }
}

/// `path` relative to the directory of the calling script's
/// `__lagoonfile__`, or to the working directory when there is none.
fn resolve_path(ev: &Evaluator<'_>, path: &str) -> PathBuf {
    let base = match ev.chain().lookup(LAGOONFILE) {
        Some(Value::Str(file)) => Path::new(&*file)
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default(),
        _ => PathBuf::new(),
    };
    normalize(&base.join(path))
}

/// Folds `.` and `name/..` components without touching the file system.
fn normalize(path: &Path) -> PathBuf {
    use std::path::Component;

    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let last = out.components().next_back();
                if matches!(last, Some(Component::Normal(_))) {
                    out.pop();
                } else if !matches!(last, Some(Component::RootDir | Component::Prefix(_))) {
                    out.push("..");
                }
            }
            other => out.push(other),
        }
    }
    out
}

fn load_script(ev: &mut Evaluator<'_>, path: &str) -> EvalResult {
    let resolved = resolve_path(ev, path);
    debug!(path = %resolved.display(), "load");
    let source = std::fs::read_to_string(&resolved)
        .map_err(|err| errors::load_failed(&resolved.display().to_string(), &err.to_string()))?;
    let chain = ScopeChain::root(seed(Some(&resolved)));
    ev.exec_text(
        SourceText::new(source).with_path(resolved.clone()),
        chain.clone(),
    )?;

    let name = resolved
        .file_stem()
        .map_or_else(|| path.to_owned(), |stem| stem.to_string_lossy().into_owned());
    let module = ModuleValue::new(Ident::from(name));
    for (name, value) in chain.local_bindings() {
        module.set(name, value);
    }
    Ok(Value::module(module))
}

/// `exec(source)`: runs a program in the caller's scope chain.
fn exec(ev: &mut Evaluator<'_>, args: Args) -> EvalResult {
    let [code] = args.exact::<1>("exec")?;
    let code = str_arg("exec", &code)?;
    debug!(bytes = code.len(), "exec");
    ev.exec_text(SourceText::new(code), ev.chain().clone())?;
    Ok(Value::None)
}

/// `eval(source)`: the value of one expression in the caller's scope chain.
fn eval(ev: &mut Evaluator<'_>, args: Args) -> EvalResult {
    let [code] = args.exact::<1>("eval")?;
    let code = str_arg("eval", &code)?;
    debug!(bytes = code.len(), "eval");
    ev.eval_text(SourceText::new(code), ev.chain().clone())
}

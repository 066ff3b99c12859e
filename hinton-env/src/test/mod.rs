#[cfg(test)]
mod tests {
    use std::{path::Path, rc::Rc};

    use hinton_lex::{Tok, TokBuffer};

    use crate::{report, BindKind, EnvError, Func, Scope, Value};

    const SCOPES: &str = include_str!("scripts/scopes.ht");

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn tok<'a>(buf: &'a TokBuffer, name: &str, line: usize) -> &'a Tok {
        buf.idents()
            .find(|t| t.lexeme == name && t.info.line == line)
            .unwrap_or_else(|| panic!("no '{name}' on line {line}"))
    }

    #[test]
    fn global_and_child_share_bindings() -> anyhow::Result<()> {
        init();
        let buf = TokBuffer::read_string("let x = 10;\n{\n  x = 20;\n}\nprint(x, y);\n")?;
        let global = Scope::new();
        global.define_var("x", Value::from(10i64));

        let child = global.child();
        assert_eq!(child.get(tok(&buf, "x", 3))?, Value::Int(10));
        child.assign(tok(&buf, "x", 3), Value::from(20i64))?;
        drop(child);

        assert_eq!(global.get(tok(&buf, "x", 5))?, Value::Int(20));
        let err = global.get(tok(&buf, "y", 5)).unwrap_err();
        assert!(matches!(err, EnvError::UndefinedIdentifier { .. }));
        assert_eq!(err.name(), "y");
        assert_eq!(err.to_string(), "Undefined variable 'y'. At => (L:5,C:9)");
        Ok(())
    }

    #[test]
    fn walkthrough_script() -> anyhow::Result<()> {
        init();
        let buf = TokBuffer::read_string(SCOPES)?;
        let path = Path::new("scopes.ht");
        let global = Scope::new();

        global.define_var(&tok(&buf, "x", 2).lexeme, Value::from(10i64));
        global.define_const(&tok(&buf, "PI", 3).lexeme, Value::from(3.14));
        global.declare_var(&tok(&buf, "pending", 4).lexeme);

        let block = global.child();
        block.define_var(&tok(&buf, "x", 6).lexeme, Value::from("shadow"));
        block.assign(tok(&buf, "x", 7), Value::from("inner"))?;
        assert_eq!(block.get(tok(&buf, "x", 7))?, Value::from("inner"));
        drop(block);

        global.assign(tok(&buf, "x", 9), Value::from(20i64))?;
        assert_eq!(global.get(tok(&buf, "x", 9))?, Value::Int(20));

        let err = global.assign(tok(&buf, "PI", 10), Value::from(3i64)).unwrap_err();
        let expected = concat!(
            "ReassignmentError: Cannot reassign to constant \"PI\".\n",
            " -----> File 'scopes.ht'.\n",
            "    |\n",
            " 10 | PI = 3;\n",
            "    | ^^\n",
        );
        assert_eq!(report::render(&err, path, SCOPES), expected);
        assert_eq!(global.get(tok(&buf, "PI", 10))?, Value::Real(3.14));

        let err = global.get(tok(&buf, "pending", 11)).unwrap_err();
        let expected = concat!(
            "ReferenceError: Variable \"pending\" has not been initialized.\n",
            " -----> File 'scopes.ht'.\n",
            "    |\n",
            " 11 | print(pending);\n",
            "    |       ^^^^^^^\n",
        );
        assert_eq!(report::render(&err, path, SCOPES), expected);

        let err = global.get(tok(&buf, "y", 12)).unwrap_err();
        assert_eq!(err.error_name(), "ReferenceError");
        assert_eq!(err.message(), "Undefined variable 'y'.");

        assert_eq!(global.len(), 3);
        Ok(())
    }

    #[test]
    fn closure_keeps_scope_alive() -> anyhow::Result<()> {
        init();
        let count = Tok::ident("count", Default::default());
        let label = Rc::<str>::from("ticks");
        let global = Scope::new();

        let tick = {
            let block = global.child();
            block.define_var("count", Value::from(0i64));
            block.define_const("label", Value::Str(label.clone()));
            Rc::new(Func::new("tick", &block))
        };

        for _ in 0..3 {
            let frame = tick.enter();
            let Value::Int(n) = frame.get(&count)? else {
                panic!("count is an Int");
            };
            frame.assign(&count, Value::from(n + 1))?;
        }

        assert_eq!(tick.closure().get(&count)?, Value::Int(3));
        assert!(global.get(&count).is_err());
        assert_eq!(Rc::strong_count(&label), 2);

        drop(tick);
        assert_eq!(Rc::strong_count(&label), 1);
        Ok(())
    }

    #[test]
    fn call_frame_encloses_definition_scope() -> anyhow::Result<()> {
        init();
        let global = Scope::new();
        global.define_var("seen", Value::from(true));
        let func = Func::new("counter", &global);
        global.define_func("counter", Value::from(func));

        let caller = global.child().child();
        caller.define_var("secret", Value::from(1i64));

        let callee = global
            .get(&Tok::ident("counter", Default::default()))?
            .as_func()
            .cloned()
            .expect("counter is a function");
        let frame = callee.enter();

        assert_eq!(frame.depth(), 1);
        assert!(frame.enclosing().is_some_and(|e| e.ptr_eq(&global)));
        assert_eq!(frame.get(&Tok::ident("seen", Default::default()))?, Value::Bool(true));
        assert!(matches!(
            frame.get(&Tok::ident("secret", Default::default())),
            Err(EnvError::UndefinedIdentifier { .. })
        ));
        assert_eq!(global.kind_of("counter"), Some(BindKind::Function));
        assert_eq!(global.get(&Tok::ident("counter", Default::default()))?.to_string(), "<Func 'counter'>");
        Ok(())
    }

    #[test]
    fn frames_dump_independently() -> anyhow::Result<()> {
        let buf = TokBuffer::read_string(SCOPES)?;
        let global = Scope::new();
        global.define_var("x", Value::from(10i64));
        let block = global.child();
        block.define_var("x", Value::from("shadow"));
        block.assign(tok(&buf, "x", 7), Value::from("inner"))?;

        assert!(block.to_string().contains("x    = inner\n"));
        assert!(global.to_string().contains("x    = 10\n"));
        Ok(())
    }
}

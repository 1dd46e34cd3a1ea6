use {
    super::Value,
    crate::{
        constants::{EXPONENT_BELOW, EXPONENT_FROM, FALSE, TRUE},
        error::ParseErrorKind,
        schema::{Field, FieldKind},
    },
};

fn render_float(x: f64, kind: FieldKind) -> String {
    let magnitude = x.abs();
    if kind == FieldKind::Exp
        || (x != 0.0 && (magnitude < EXPONENT_BELOW || magnitude >= EXPONENT_FROM))
    {
        format!("{:e}", x)
    } else {
        format!("{}", x)
    }
}

/// Text of a value before justification.
pub fn render_value(value: &Value, field: &Field) -> String {
    match value {
        Value::Int(i) => i.to_string(),
        Value::Float(x) => render_float(*x, field.kind),
        Value::Bool(b) => (if *b { TRUE } else { FALSE }).to_owned(),
        Value::Text(s) => s.clone(),
    }
}

/// Renders values right-justified in their fields, separated by a space.
pub fn render_line<'a, F>(values: &[Value], fields: F) -> String
where
    F: IntoIterator<Item = &'a Field>,
{
    let line = values
        .iter()
        .zip(fields)
        .map(|(value, field)| format!("{:>1$}", render_value(value, field), field.width))
        .collect::<Vec<_>>()
        .join(" ");
    line.trim_end().to_owned()
}

/// Converts a token to the kind declared by its field.
pub fn parse_token(token: &str, field: &Field) -> Result<Value, ParseErrorKind> {
    let invalid = |expected: &'static str| ParseErrorKind::InvalidToken {
        field: field.name,
        expected,
        token: token.to_owned(),
    };

    match field.kind {
        FieldKind::Int => token
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| invalid("integer")),
        FieldKind::Float | FieldKind::Exp => token
            .replace(|c: char| c == 'd' || c == 'D', "e")
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| invalid("real number")),
        FieldKind::Bool => match token.to_ascii_lowercase().as_str() {
            "t" | "true" | ".true." => Ok(Value::Bool(true)),
            "f" | "false" | ".false." => Ok(Value::Bool(false)),
            _ => Err(invalid("logical")),
        },
        FieldKind::Label => Ok(Value::Text(token.to_owned())),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn field(kind: FieldKind, width: usize) -> Field {
        Field {
            name: "x",
            kind,
            width,
        }
    }

    #[test]
    fn floats() {
        let f = field(FieldKind::Float, 0);
        assert_eq!(render_value(&Value::Float(0.078), &f), "0.078");
        assert_eq!(render_value(&Value::Float(24.96), &f), "24.96");
        assert_eq!(render_value(&Value::Float(1.0), &f), "1");
        assert_eq!(render_value(&Value::Float(0.0), &f), "0");
        assert_eq!(render_value(&Value::Float(0.0001), &f), "0.0001");
        assert_eq!(render_value(&Value::Float(1e-5), &f), "1e-5");
        assert_eq!(render_value(&Value::Float(-1e10), &f), "-1e10");
    }

    #[test]
    fn exponent_fields() {
        let f = field(FieldKind::Exp, 12);
        assert_eq!(render_value(&Value::Float(1.56728e16), &f), "1.56728e16");
        assert_eq!(render_value(&Value::Float(0.0), &f), "0e0");
    }

    #[test]
    fn justified_line() {
        let fields = vec![
            field(FieldKind::Int, 4),
            field(FieldKind::Float, 8),
            field(FieldKind::Bool, 5),
        ];
        let values = vec![Value::Int(10), Value::Float(0.001), Value::Bool(false)];
        assert_eq!(render_line(&values, &fields), "  10    0.001     f");
    }

    #[test]
    fn trailing_label() {
        let fields = vec![
            field(FieldKind::Float, 6),
            Field {
                name: "Name",
                kind: FieldKind::Label,
                width: 0,
            },
        ];
        let values = vec![Value::Float(0.5), Value::Text("Silt Loam".to_owned())];
        assert_eq!(render_line(&values, &fields), "   0.5 Silt Loam");

        let unnamed = vec![Value::Float(0.5), Value::Text(String::new())];
        assert_eq!(render_line(&unnamed, &fields), "   0.5");
    }

    #[test]
    fn tokens() {
        assert_eq!(
            parse_token("-4", &field(FieldKind::Int, 3)),
            Ok(Value::Int(-4))
        );
        assert_eq!(
            parse_token("1.0D-05", &field(FieldKind::Float, 3)),
            Ok(Value::Float(1e-5))
        );
        assert_eq!(
            parse_token("T", &field(FieldKind::Bool, 3)),
            Ok(Value::Bool(true))
        );
        assert_eq!(
            parse_token("1.5", &field(FieldKind::Int, 3)),
            Err(ParseErrorKind::InvalidToken {
                field: "x",
                expected: "integer",
                token: "1.5".to_owned(),
            })
        );
        assert!(parse_token("yes", &field(FieldKind::Bool, 3)).is_err());
    }
}

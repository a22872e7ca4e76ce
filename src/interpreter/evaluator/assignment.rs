use std::iter;

use crate::{
    ast::{Expr, Identifier, Target},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
    util::num::index_to_slot,
};

impl Context {
    /// Executes `x <- value` or `T[i] <- value`.
    ///
    /// The right-hand side is evaluated first and must produce a value.
    pub(crate) fn exec_assignment(&mut self, target: &Target, value: &Expr) -> EvalResult<()> {
        let value = self.eval_expr(value)?;

        match target {
            Target::Variable(identifier) => {
                self.assign(&identifier.name, value);
                Ok(())
            },
            Target::Element { array, index } => self.assign_element(array, index, value),
        }
    }

    /// Writes one element of an array or one character of a string.
    ///
    /// An unknown name is first bound to a new empty array in the top frame.
    /// Arrays are changed in place, so every alias sees the write; writing
    /// one past the last element appends. A string is replaced by a copy with
    /// the character swapped, which also allows appending one character.
    ///
    /// # Errors
    /// - `Zmienna {x} nie jest tablicą ani napisem.` at the variable.
    /// - `Indeks {i} poza długością tablicy/napisu {x}.` at the index when it
    ///   is not an integer, lies below the origin or leaves a gap in an
    ///   array; `Indeks {i} poza długością napisu {x}.` when it leaves a gap
    ///   in a string.
    /// - `W napisie można zamienić jedynie pojedynczy znak na inny znak.` at
    ///   the variable when a string receives anything but one character.
    fn assign_element(&mut self, name: &Identifier, index: &Expr, value: Value) -> EvalResult<()> {
        let current = match self.lookup(&name.name) {
            Some(existing) => existing.clone(),
            None => {
                let fresh = Value::from(Vec::<Value>::new());
                self.define(&name.name, fresh.clone());
                fresh
            },
        };

        let origin = match &current {
            Value::Array(_) => self.options.array_origin,
            Value::Text(_) => self.options.string_origin,
            _ => return Err(not_indexable(name)),
        };

        let index_value = self.eval_expr(index)?;
        let out_of_range = |kind: &str| {
            RuntimeError::new(format!("Indeks {index_value} poza długością {kind} {}.", name.name),
                              index.position())
        };

        let slot = match &index_value {
                       Value::Number(n) => index_to_slot(*n, origin),
                       _ => None,
                   }.ok_or_else(|| out_of_range("tablicy/napisu"))?;

        match current {
            Value::Array(items) => {
                let mut items = items.borrow_mut();

                if slot > items.len() {
                    return Err(out_of_range("tablicy/napisu"));
                }
                if slot == items.len() {
                    items.push(value);
                } else {
                    items[slot] = value;
                }
                Ok(())
            },
            Value::Text(text) => {
                if slot > text.chars().count() {
                    return Err(out_of_range("napisu"));
                }

                let replacement = single_char(&value).ok_or_else(|| {
                                      RuntimeError::new("W napisie można zamienić jedynie \
                                                         pojedynczy znak na inny znak.",
                                                        name.position)
                                  })?;

                let spliced = text.chars()
                                  .take(slot)
                                  .chain(iter::once(replacement))
                                  .chain(text.chars().skip(slot + 1))
                                  .collect::<String>();

                self.assign(&name.name, Value::Text(spliced));
                Ok(())
            },
            _ => Err(not_indexable(name)),
        }
    }
}

fn not_indexable(name: &Identifier) -> RuntimeError {
    RuntimeError::new(format!("Zmienna {} nie jest tablicą ani napisem.", name.name),
                      name.position)
}

/// Returns the character of a one-character string.
fn single_char(value: &Value) -> Option<char> {
    let Value::Text(text) = value else {
        return None;
    };

    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

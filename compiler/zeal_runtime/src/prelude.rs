//! Native functions every global scope starts with.
//!
//! Everything is bound with `define`: a user function named `add` merges
//! into the same overload group as the built-in `add` overloads, and the
//! `core` module exports the whole prelude.

use zeal_ir::Name;

use crate::{NativeFn, Object, ObjectId, Runtime, RuntimeError, RuntimeResult, ScopeId};

/// Define the core types and the native functions into `scope`.
pub fn install(rt: &mut Runtime, scope: ScopeId) -> RuntimeResult<()> {
    for (name, ty) in rt.core().named_types() {
        let name = rt.intern(name);
        rt.define(scope, name, ty)?;
    }

    let core = rt.core().clone();
    let (any, int, float, string, bool_, type_, unit) = (
        core.any, core.int, core.float, core.string, core.bool_, core.type_, core.unit,
    );

    let natives: [(&str, Option<Vec<ObjectId>>, ObjectId, NativeFn); 21] = [
        ("print", None, unit, print),
        ("add", Some(vec![int, int]), int, add_int),
        ("sub", Some(vec![int, int]), int, sub_int),
        ("mul", Some(vec![int, int]), int, mul_int),
        ("div", Some(vec![int, int]), int, div_int),
        ("add", Some(vec![float, float]), float, add_float),
        ("sub", Some(vec![float, float]), float, sub_float),
        ("mul", Some(vec![float, float]), float, mul_float),
        ("div", Some(vec![float, float]), float, div_float),
        ("add", Some(vec![string, string]), string, concat),
        ("lt", Some(vec![int, int]), bool_, lt_int),
        ("gt", Some(vec![int, int]), bool_, gt_int),
        ("lt", Some(vec![float, float]), bool_, lt_float),
        ("gt", Some(vec![float, float]), bool_, gt_float),
        ("eq", Some(vec![any, any]), bool_, eq),
        ("not", Some(vec![bool_]), bool_, not),
        ("str", Some(vec![any]), string, to_str),
        ("type_of", Some(vec![any]), type_, type_of),
        ("is_instance", Some(vec![any, type_]), bool_, is_instance),
        ("nullable", Some(vec![type_]), type_, nullable),
        ("getattr", Some(vec![any, string]), any, getattr),
    ];
    for (name, parameters, returns, func) in natives {
        let native = rt.new_native(name, parameters, returns, func);
        let name = rt.intern(name);
        rt.define(scope, name, native)?;
    }

    let native = rt.new_native("setattr", Some(vec![any, string, any]), unit, setattr);
    let name = rt.intern("setattr");
    rt.define(scope, name, native)
}

// ===== Argument access =====

fn int_arg(rt: &Runtime, value: ObjectId) -> RuntimeResult<i64> {
    match rt.object(value) {
        Object::Int(n) => Ok(*n),
        _ => Err(mismatch(rt, value, rt.core().int)),
    }
}

fn float_arg(rt: &Runtime, value: ObjectId) -> RuntimeResult<f64> {
    match rt.object(value) {
        Object::Float(f) => Ok(*f),
        _ => Err(mismatch(rt, value, rt.core().float)),
    }
}

fn str_arg(rt: &Runtime, value: ObjectId) -> RuntimeResult<&str> {
    match rt.object(value) {
        Object::Str(s) => Ok(s),
        _ => Err(mismatch(rt, value, rt.core().string)),
    }
}

fn mismatch(rt: &Runtime, value: ObjectId, expected: ObjectId) -> RuntimeError {
    RuntimeError::NotAssignable {
        expected: rt.type_name(expected),
        found: rt.type_name(rt.runtime_type(value)),
    }
}

fn pair<T>(
    rt: &Runtime,
    args: &[ObjectId],
    get: fn(&Runtime, ObjectId) -> RuntimeResult<T>,
) -> RuntimeResult<(T, T)> {
    match args {
        [a, b] => Ok((get(rt, *a)?, get(rt, *b)?)),
        _ => Err(RuntimeError::WrongArity {
            expected: 2,
            found: args.len(),
        }),
    }
}

fn single(args: &[ObjectId]) -> RuntimeResult<ObjectId> {
    match args {
        [a] => Ok(*a),
        _ => Err(RuntimeError::WrongArity {
            expected: 1,
            found: args.len(),
        }),
    }
}

fn member_name(rt: &Runtime, value: ObjectId) -> RuntimeResult<Name> {
    let text = str_arg(rt, value)?;
    Ok(rt.intern(text))
}

// ===== Natives =====

fn print(rt: &mut Runtime, args: &[ObjectId]) -> RuntimeResult<ObjectId> {
    let parts: Vec<String> = args.iter().map(|&a| rt.display(a)).collect();
    rt.print_handler().println(&parts.join(" "));
    Ok(rt.core().unit_value)
}

fn checked(
    rt: &mut Runtime,
    args: &[ObjectId],
    operation: &'static str,
    op: fn(i64, i64) -> Option<i64>,
) -> RuntimeResult<ObjectId> {
    let (a, b) = pair(rt, args, int_arg)?;
    let result = op(a, b).ok_or(RuntimeError::IntegerOverflow { operation })?;
    Ok(rt.int(result))
}

fn add_int(rt: &mut Runtime, args: &[ObjectId]) -> RuntimeResult<ObjectId> {
    checked(rt, args, "add", i64::checked_add)
}

fn sub_int(rt: &mut Runtime, args: &[ObjectId]) -> RuntimeResult<ObjectId> {
    checked(rt, args, "sub", i64::checked_sub)
}

fn mul_int(rt: &mut Runtime, args: &[ObjectId]) -> RuntimeResult<ObjectId> {
    checked(rt, args, "mul", i64::checked_mul)
}

fn div_int(rt: &mut Runtime, args: &[ObjectId]) -> RuntimeResult<ObjectId> {
    let (_, divisor) = pair(rt, args, int_arg)?;
    if divisor == 0 {
        return Err(RuntimeError::DivisionByZero);
    }
    checked(rt, args, "div", i64::checked_div)
}

fn float_op(rt: &mut Runtime, args: &[ObjectId], op: fn(f64, f64) -> f64) -> RuntimeResult<ObjectId> {
    let (a, b) = pair(rt, args, float_arg)?;
    Ok(rt.float(op(a, b)))
}

fn add_float(rt: &mut Runtime, args: &[ObjectId]) -> RuntimeResult<ObjectId> {
    float_op(rt, args, |a, b| a + b)
}

fn sub_float(rt: &mut Runtime, args: &[ObjectId]) -> RuntimeResult<ObjectId> {
    float_op(rt, args, |a, b| a - b)
}

fn mul_float(rt: &mut Runtime, args: &[ObjectId]) -> RuntimeResult<ObjectId> {
    float_op(rt, args, |a, b| a * b)
}

fn div_float(rt: &mut Runtime, args: &[ObjectId]) -> RuntimeResult<ObjectId> {
    float_op(rt, args, |a, b| a / b)
}

fn concat(rt: &mut Runtime, args: &[ObjectId]) -> RuntimeResult<ObjectId> {
    let (a, b) = pair(rt, args, |_, id| Ok(id))?;
    let joined = format!("{}{}", str_arg(rt, a)?, str_arg(rt, b)?);
    Ok(rt.string(joined))
}

fn lt_int(rt: &mut Runtime, args: &[ObjectId]) -> RuntimeResult<ObjectId> {
    let (a, b) = pair(rt, args, int_arg)?;
    Ok(rt.bool(a < b))
}

fn gt_int(rt: &mut Runtime, args: &[ObjectId]) -> RuntimeResult<ObjectId> {
    let (a, b) = pair(rt, args, int_arg)?;
    Ok(rt.bool(a > b))
}

fn lt_float(rt: &mut Runtime, args: &[ObjectId]) -> RuntimeResult<ObjectId> {
    let (a, b) = pair(rt, args, float_arg)?;
    Ok(rt.bool(a < b))
}

fn gt_float(rt: &mut Runtime, args: &[ObjectId]) -> RuntimeResult<ObjectId> {
    let (a, b) = pair(rt, args, float_arg)?;
    Ok(rt.bool(a > b))
}

fn eq(rt: &mut Runtime, args: &[ObjectId]) -> RuntimeResult<ObjectId> {
    let (a, b) = pair(rt, args, |_, id| Ok(id))?;
    Ok(rt.bool(rt.values_equal(a, b)))
}

fn not(rt: &mut Runtime, args: &[ObjectId]) -> RuntimeResult<ObjectId> {
    let value = single(args)?;
    Ok(rt.bool(!rt.is_truthy(value)))
}

fn to_str(rt: &mut Runtime, args: &[ObjectId]) -> RuntimeResult<ObjectId> {
    let text = rt.display(single(args)?);
    Ok(rt.string(text))
}

fn type_of(rt: &mut Runtime, args: &[ObjectId]) -> RuntimeResult<ObjectId> {
    Ok(rt.runtime_type(single(args)?))
}

fn is_instance(rt: &mut Runtime, args: &[ObjectId]) -> RuntimeResult<ObjectId> {
    let (value, ty) = pair(rt, args, |_, id| Ok(id))?;
    Ok(rt.bool(rt.is_instance(value, ty)))
}

fn nullable(rt: &mut Runtime, args: &[ObjectId]) -> RuntimeResult<ObjectId> {
    let inner = rt.expect_type(single(args)?)?;
    Ok(rt.new_nullable(inner))
}

fn getattr(rt: &mut Runtime, args: &[ObjectId]) -> RuntimeResult<ObjectId> {
    let (receiver, name) = pair(rt, args, |_, id| Ok(id))?;
    let name = member_name(rt, name)?;
    let binding = rt.get_member(receiver, name)?;
    rt.read(binding)
}

fn setattr(rt: &mut Runtime, args: &[ObjectId]) -> RuntimeResult<ObjectId> {
    let &[receiver, name, value] = args else {
        return Err(RuntimeError::WrongArity {
            expected: 3,
            found: args.len(),
        });
    };
    let name = member_name(rt, name)?;
    let slot = rt.get_member(receiver, name)?;
    rt.assign(slot, value)?;
    Ok(rt.core().unit_value)
}

#[cfg(test)]
mod tests;

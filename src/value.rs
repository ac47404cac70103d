//! Runtime values and the callable capability.
//!
//! `Value` is cheap to clone: compound values sit behind `Rc`, and the
//! environment chain, closures, and instances all share them.  Instances
//! and bound methods can form reference cycles (an instance field holding
//! a closure that captured the instance); those few cycles are accepted
//! and live until process exit, matching the host-memory-model stance of
//! the design.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;

use crate::environment::{EnvRef, Environment};
use crate::interpreter::{EvalResult, Interpreter, RuntimeError, Signal};
use crate::native::NativeFunction;
use crate::stmt::Stmt;
use crate::token::{Position, Token};

/// Name of the method a class call runs on the fresh instance.
pub const INITIALIZER: &str = "init";

#[derive(Debug, Clone)]
pub enum Value {
    Number(f64),
    Str(String),
    Bool(bool),
    Nil,
    Native(Rc<NativeFunction>),
    Function(Rc<Function>),
    Class(Rc<Class>),
    Instance(Rc<RefCell<Instance>>),
}

impl Value {
    /// nil and `false` are falsy; every other value (including `0` and
    /// the empty string) is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Bool(b) => *b,
            _ => true,
        }
    }

    /// Rendering used by `print`/`str` and value display: integral
    /// numbers drop their fraction, nil prints as `nil`.
    pub fn stringify(&self) -> String {
        self.to_string()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Nil, Value::Nil) => true,
            (Value::Native(a), Value::Native(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Class(a), Value::Class(b)) => Rc::ptr_eq(a, b),
            (Value::Instance(a), Value::Instance(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    write!(f, "{:.0}", n)
                } else {
                    write!(f, "{}", n)
                }
            }

            Value::Str(s) => write!(f, "{}", s),

            Value::Bool(b) => write!(f, "{}", b),

            Value::Nil => write!(f, "nil"),

            Value::Native(native) => write!(f, "<native fn {}>", native.name),

            Value::Function(function) => match &function.name {
                Some(name) => write!(f, "<fn {}>", name),
                None => write!(f, "<fn>"),
            },

            Value::Class(class) => write!(f, "{}", class.name),

            Value::Instance(instance) => {
                write!(f, "{} instance", instance.borrow().class.name)
            }
        }
    }
}

/// The callable capability: a fixed arity plus an invocation operation.
/// Implemented by native functions, user functions, and classes (a class
/// call is its constructor).  The interpreter checks arity before
/// dispatching, so implementations may assume `args.len() == arity()`.
pub trait Callable {
    fn arity(&self) -> usize;

    fn call(
        &self,
        interpreter: &mut Interpreter<'_>,
        args: Vec<Value>,
        position: Position,
    ) -> EvalResult<Value>;
}

/// A user function: parameter list, body, and the environment captured at
/// the moment the `fn` literal was evaluated.  Capture is by reference —
/// later mutations of captured variables are visible to the closure.
#[derive(Debug)]
pub struct Function {
    /// Binding name, if the literal was declared rather than anonymous.
    pub name: Option<String>,
    pub params: Vec<Token>,
    pub body: Rc<Vec<Stmt>>,
    pub closure: EnvRef,

    /// Constructors return the bound receiver rather than their
    /// `return` value.
    pub is_initializer: bool,
}

impl Function {
    /// A copy of this function whose closure has `receiver` bound as
    /// `self` in a fresh scope.  Method access on instances and classes
    /// goes through here.
    pub fn bind(&self, receiver: Value) -> Function {
        let env = Environment::with_parent(Rc::clone(&self.closure));
        let _ = env.borrow_mut().define("self", receiver);

        Function {
            name: self.name.clone(),
            params: self.params.clone(),
            body: Rc::clone(&self.body),
            closure: env,
            is_initializer: self.is_initializer,
        }
    }

    fn bound_receiver(&self, position: Position) -> EvalResult<Value> {
        Environment::get_at(&self.closure, 0, "self", position)
            .map_err(|(pos, msg)| Signal::Fault(RuntimeError::new(pos, msg)))
    }
}

impl Callable for Rc<Function> {
    fn arity(&self) -> usize {
        self.params.len()
    }

    fn call(
        &self,
        interpreter: &mut Interpreter<'_>,
        args: Vec<Value>,
        position: Position,
    ) -> EvalResult<Value> {
        let env = Environment::with_parent(Rc::clone(&self.closure));

        for (param, arg) in self.params.iter().zip(args) {
            let _ = env.borrow_mut().define(&param.lexeme, arg);
        }

        let body = Rc::clone(&self.body);

        match interpreter.execute_block(&body, env) {
            Ok(()) => {
                if self.is_initializer {
                    self.bound_receiver(position)
                } else {
                    Ok(Value::Nil)
                }
            }

            // `return` unwinds exactly to this call boundary.
            Err(Signal::Return(value)) => {
                if self.is_initializer {
                    self.bound_receiver(position)
                } else {
                    Ok(value)
                }
            }

            Err(other) => Err(other),
        }
    }
}

impl Callable for Rc<NativeFunction> {
    fn arity(&self) -> usize {
        self.arity
    }

    fn call(
        &self,
        interpreter: &mut Interpreter<'_>,
        args: Vec<Value>,
        position: Position,
    ) -> EvalResult<Value> {
        (self.func)(interpreter, &args)
            .map_err(|msg| Signal::Fault(RuntimeError::new(position, msg)))
    }
}

/// A class value: the method table plus field declarations for instances.
///
/// The class is also its own "instance": `fields` holds the evaluated
/// field defaults, doubles as static-member storage, and is snapshotted
/// into every new instance.  Static writes therefore update the defaults
/// seen by instances created afterwards.
#[derive(Debug)]
pub struct Class {
    pub name: String,
    methods: HashMap<String, Rc<Function>>,
    statics: HashSet<String>,
    fields: RefCell<HashMap<String, Value>>,
}

impl Class {
    pub fn new(
        name: String,
        methods: HashMap<String, Rc<Function>>,
        fields: HashMap<String, Value>,
        statics: HashSet<String>,
    ) -> Self {
        Class {
            name,
            methods,
            statics,
            fields: RefCell::new(fields),
        }
    }

    pub fn find_method(&self, name: &str) -> Option<Rc<Function>> {
        self.methods.get(name).cloned()
    }

    pub fn is_static(&self, name: &str) -> bool {
        self.statics.contains(name)
    }

    /// Static member read.  The class routes through its own field map,
    /// gated by the declared-static check, then falls back to a method
    /// bound to the class value itself.
    pub fn get(class: &Rc<Class>, name: &Token) -> Result<Value, (Position, String)> {
        if !class.is_static(&name.lexeme) {
            return Err((
                name.position,
                format!("Undefined static '{}'", name.lexeme),
            ));
        }

        if let Some(value) = class.fields.borrow().get(&name.lexeme) {
            return Ok(value.clone());
        }

        if let Some(method) = class.find_method(&name.lexeme) {
            let bound = method.bind(Value::Class(Rc::clone(class)));
            return Ok(Value::Function(Rc::new(bound)));
        }

        Err((
            name.position,
            format!("Undefined property '{}'", name.lexeme),
        ))
    }

    /// Static member write.  Only declared static fields are assignable.
    pub fn set(class: &Rc<Class>, name: &Token, value: Value) -> Result<(), (Position, String)> {
        if !class.is_static(&name.lexeme) {
            return Err((
                name.position,
                format!("Undefined static '{}'", name.lexeme),
            ));
        }

        let mut fields = class.fields.borrow_mut();

        if fields.contains_key(&name.lexeme) {
            fields.insert(name.lexeme.clone(), value);
            return Ok(());
        }

        Err((
            name.position,
            format!("Undefined property '{}'", name.lexeme),
        ))
    }

    /// Snapshot of the field defaults used to seed a new instance.
    fn field_defaults(&self) -> HashMap<String, Value> {
        self.fields.borrow().clone()
    }
}

impl Callable for Rc<Class> {
    fn arity(&self) -> usize {
        self.find_method(INITIALIZER)
            .map_or(0, |init| init.params.len())
    }

    /// Calling a class allocates an instance seeded with the class's
    /// field defaults, then runs `init` (if present) bound to it.
    fn call(
        &self,
        interpreter: &mut Interpreter<'_>,
        args: Vec<Value>,
        position: Position,
    ) -> EvalResult<Value> {
        let instance = Rc::new(RefCell::new(Instance {
            class: Rc::clone(self),
            fields: self.field_defaults(),
        }));

        if let Some(init) = self.find_method(INITIALIZER) {
            let bound = Rc::new(init.bind(Value::Instance(Rc::clone(&instance))));
            bound.call(interpreter, args, position)?;
        }

        Ok(Value::Instance(instance))
    }
}

/// A runtime object: a back-reference to its class and its field map.
#[derive(Debug)]
pub struct Instance {
    pub class: Rc<Class>,
    fields: HashMap<String, Value>,
}

impl Instance {
    /// Property read: fields take priority over methods; an absent
    /// property is an error.
    pub fn get(
        instance: &Rc<RefCell<Instance>>,
        name: &Token,
    ) -> Result<Value, (Position, String)> {
        if let Some(value) = instance.borrow().fields.get(&name.lexeme) {
            return Ok(value.clone());
        }

        let method = instance.borrow().class.find_method(&name.lexeme);

        if let Some(method) = method {
            let bound = method.bind(Value::Instance(Rc::clone(instance)));
            return Ok(Value::Function(Rc::new(bound)));
        }

        Err((
            name.position,
            format!("Undefined property '{}'", name.lexeme),
        ))
    }

    /// Property write.  Only fields declared on the class exist; writing
    /// anything else is an error.
    pub fn set(
        instance: &Rc<RefCell<Instance>>,
        name: &Token,
        value: Value,
    ) -> Result<(), (Position, String)> {
        let mut inner = instance.borrow_mut();

        if inner.fields.contains_key(&name.lexeme) {
            inner.fields.insert(name.lexeme.clone(), value);
            return Ok(());
        }

        Err((
            name.position,
            format!("Undefined property '{}'", name.lexeme),
        ))
    }
}

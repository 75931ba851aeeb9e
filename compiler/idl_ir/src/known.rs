//! Qualified names of the platform classes the mapping treats specially.

pub const JAVA_LANG_OBJECT: &str = "java.lang.Object";
pub const JAVA_LANG_STRING: &str = "java.lang.String";
pub const JAVA_LANG_CLASS: &str = "java.lang.Class";
pub const THROWABLE: &str = "java.lang.Throwable";
pub const EXCEPTION: &str = "java.lang.Exception";
pub const RUNTIME_EXCEPTION: &str = "java.lang.RuntimeException";
pub const ERROR: &str = "java.lang.Error";

pub const SERIALIZABLE: &str = "java.io.Serializable";
pub const EXTERNALIZABLE: &str = "java.io.Externalizable";
pub const IO_EXCEPTION: &str = "java.io.IOException";
pub const OBJECT_OUTPUT_STREAM: &str = "java.io.ObjectOutputStream";
pub const OBJECT_INPUT_STREAM: &str = "java.io.ObjectInputStream";
pub const OBJECT_STREAM_FIELD: &str = "java.io.ObjectStreamField";

pub const REMOTE: &str = "java.rmi.Remote";
pub const REMOTE_EXCEPTION: &str = "java.rmi.RemoteException";

pub const CORBA_OBJECT: &str = "org.omg.CORBA.Object";
pub const CORBA_USER_EXCEPTION: &str = "org.omg.CORBA.UserException";
pub const IDL_ENTITY: &str = "org.omg.CORBA.portable.IDLEntity";
pub const VALUE_BASE: &str = "org.omg.CORBA.portable.ValueBase";

pub const CLASS_DESC: &str = "javax.rmi.CORBA.ClassDesc";

/// Name of the field that declares the serializable state explicitly.
pub const SERIAL_PERSISTENT_FIELDS: &str = "serialPersistentFields";

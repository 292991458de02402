//! Translations and the language selector preference.
//!
//! The catalog embeds English and Spanish tables. Lookups try the active
//! language, then Spanish (the fallback language), then return the key.
//!
//! Two storage keys are involved:
//! - `i18nLang` seeds the catalog once at startup (default English);
//! - `language` is the selector preference (default Spanish) and is written
//!   every time the user switches language.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::storage::KeyValueStore;

/// Storage key of the selector preference.
pub const LANGUAGE_KEY: &str = "language";

/// Storage key of the locale read once at startup.
pub const LOCALE_KEY: &str = "i18nLang";

/// Supported UI languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    /// English.
    En,
    /// Spanish.
    Es,
}

impl Language {
    /// Language used when a key is missing from the active table.
    pub const FALLBACK: Self = Self::Es;

    /// All languages, in selector order.
    #[must_use]
    pub const fn all() -> [Self; 2] {
        [Self::En, Self::Es]
    }

    /// Two-letter code stored on disk.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }

    /// Parses a two-letter code.
    #[must_use]
    pub fn parse(code: &str) -> Option<Self> {
        match code.trim() {
            "en" => Some(Self::En),
            "es" => Some(Self::Es),
            _ => None,
        }
    }

    /// The next language in selector order, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::En => Self::Es,
            Self::Es => Self::En,
        }
    }

    const fn table(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::En => EN,
            Self::Es => ES,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Translation catalog with a switchable active language.
#[derive(Debug)]
pub struct Catalog {
    active: RwLock<Language>,
}

impl Catalog {
    /// Creates a catalog with `language` active.
    #[must_use]
    pub fn new(language: Language) -> Self {
        Self {
            active: RwLock::new(language),
        }
    }

    /// Creates a catalog from the startup locale key (default English).
    #[must_use]
    pub fn from_storage(storage: &dyn KeyValueStore) -> Self {
        let language = storage
            .get(LOCALE_KEY)
            .as_deref()
            .and_then(Language::parse)
            .unwrap_or(Language::En);
        Self::new(language)
    }

    /// Currently active language.
    #[must_use]
    pub fn language(&self) -> Language {
        *self.active.read()
    }

    /// Switches the active language.
    pub fn set_language(&self, language: Language) {
        *self.active.write() = language;
    }

    /// Looks up `key`, returning `None` if neither the active nor the fallback
    /// table has it.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&'static str> {
        let active = self.language();
        find(active.table(), key).or_else(|| find(Language::FALLBACK.table(), key))
    }

    /// Translates `key`, returning the key itself when it is unknown.
    #[must_use]
    pub fn t(&self, key: &str) -> String {
        self.lookup(key).map_or_else(|| key.to_string(), str::to_string)
    }
}

fn find(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// The persisted language selector preference.
pub struct LanguagePreference {
    storage: Arc<dyn KeyValueStore>,
    catalog: Arc<Catalog>,
}

impl LanguagePreference {
    /// Loads the preference (default Spanish) and applies it to `catalog`.
    #[must_use]
    pub fn load(storage: Arc<dyn KeyValueStore>, catalog: Arc<Catalog>) -> Self {
        let preference = Self { storage, catalog };
        let language = preference
            .storage
            .get(LANGUAGE_KEY)
            .as_deref()
            .and_then(Language::parse)
            .unwrap_or(Language::Es);
        preference.set(language);
        preference
    }

    /// Current preference.
    #[must_use]
    pub fn current(&self) -> Language {
        self.catalog.language()
    }

    /// Switches the catalog to `language` and persists the choice.
    pub fn set(&self, language: Language) {
        self.catalog.set_language(language);
        if let Err(e) = self.storage.set(LANGUAGE_KEY, language.code()) {
            tracing::warn!(error = %e, "failed to persist language preference");
        }
        tracing::info!(language = %language, "language changed");
    }

    /// Advances to the next language and returns it.
    pub fn cycle(&self) -> Language {
        let next = self.current().next();
        self.set(next);
        next
    }
}

impl std::fmt::Debug for LanguagePreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguagePreference")
            .field("current", &self.current())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

const EN: &[(&str, &str)] = &[
    ("request_error", "The request could not be completed"),
    ("register_error", "Registration failed"),
    ("logout", "Log out"),
    ("language.title", "Language"),
    ("language.select", "Select a language"),
    ("language.en", "English"),
    ("language.es", "Spanish"),
    ("login.title", "Log in"),
    ("login.email", "Email"),
    ("login.password", "Password"),
    ("login.login_button", "Log in"),
    ("login.forgot_details", "Forgot your password?"),
    ("login.no_account", "No account yet?"),
    ("login.register", "Register"),
    ("register.title", "Create account"),
    ("register.password", "Password"),
    ("register.register_button", "Register"),
    ("register.account", "Already have an account?"),
    ("register.login", "Log in"),
    ("recover.title", "Recover password"),
    ("recover.email", "Email"),
    ("recover.recover_button", "Send recovery email"),
    ("recover.toast_email_sent", "Recovery email sent"),
    ("recover.account", "Remembered it?"),
    ("recover.login", "Log in"),
    ("home.title", "My tasks"),
    ("home.add_task_button", "Add task"),
    ("home.new_task", "New task"),
    ("home.new_task_title", "Title"),
    ("home.modify", "Edit"),
    ("home.create", "Create"),
    ("home.cancel", "Cancel"),
    ("home.no_tasks", "No tasks yet"),
    ("home.created_at", "Created"),
    ("home.delete", "Delete"),
    ("home.total", "Total"),
    ("home.completed", "Completed"),
    ("home.pending", "Pending"),
    ("home.toast_task_created", "Task created"),
    ("home.toast_task_modified", "Task updated"),
    ("home.toast_task_deleted", "Task deleted"),
    ("home.question_task_delete", "Delete this task?"),
    ("validation.email_required", "Email is required"),
    ("validation.email_invalid", "Email address is not valid"),
    ("validation.password_required", "Password is required"),
    ("validation.title_required", "Title is required"),
    ("validation.title_too_long", "Title is too long"),
    ("status.busy", "Working..."),
    ("status.help_public", "Tab: next field | Enter: submit | F3/F4/F5: login/register/recover | F2: language | Esc: quit"),
    ("status.help_home", "n: new | e: edit | Space: toggle | d: delete | r: reload | L: logout | F2: language | Esc: quit"),
    ("status.help_form", "Enter: save | Esc: cancel"),
    ("status.help_confirm", "y: confirm | n/Esc: cancel"),
    ("firebase.auth/invalid-credential", "Invalid email or password"),
    ("firebase.auth/user-not-found", "No account exists for this email"),
    ("firebase.auth/wrong-password", "Invalid email or password"),
    ("firebase.auth/email-already-in-use", "This email is already registered"),
    ("firebase.auth/invalid-email", "Email address is not valid"),
    ("firebase.auth/weak-password", "Password is too weak"),
    ("firebase.auth/too-many-requests", "Too many attempts, try again later"),
];

const ES: &[(&str, &str)] = &[
    ("request_error", "No se pudo completar la solicitud"),
    ("register_error", "Error en el registro"),
    ("logout", "Cerrar sesión"),
    ("language.title", "Idioma"),
    ("language.select", "Selecciona un idioma"),
    ("language.en", "Inglés"),
    ("language.es", "Español"),
    ("login.title", "Iniciar sesión"),
    ("login.email", "Correo electrónico"),
    ("login.password", "Contraseña"),
    ("login.login_button", "Entrar"),
    ("login.forgot_details", "¿Olvidaste tu contraseña?"),
    ("login.no_account", "¿No tienes cuenta?"),
    ("login.register", "Regístrate"),
    ("register.title", "Crear cuenta"),
    ("register.password", "Contraseña"),
    ("register.register_button", "Registrarse"),
    ("register.account", "¿Ya tienes cuenta?"),
    ("register.login", "Inicia sesión"),
    ("recover.title", "Recuperar contraseña"),
    ("recover.email", "Correo electrónico"),
    ("recover.recover_button", "Enviar correo de recuperación"),
    ("recover.toast_email_sent", "Correo de recuperación enviado"),
    ("recover.account", "¿La recordaste?"),
    ("recover.login", "Inicia sesión"),
    ("home.title", "Mis tareas"),
    ("home.add_task_button", "Añadir tarea"),
    ("home.new_task", "Nueva tarea"),
    ("home.new_task_title", "Título"),
    ("home.modify", "Modificar"),
    ("home.create", "Crear"),
    ("home.cancel", "Cancelar"),
    ("home.no_tasks", "No hay tareas"),
    ("home.created_at", "Creada"),
    ("home.delete", "Eliminar"),
    ("home.total", "Total"),
    ("home.completed", "Completadas"),
    ("home.pending", "Pendientes"),
    ("home.toast_task_created", "Tarea creada"),
    ("home.toast_task_modified", "Tarea modificada"),
    ("home.toast_task_deleted", "Tarea eliminada"),
    ("home.question_task_delete", "¿Eliminar esta tarea?"),
    ("validation.email_required", "El correo es obligatorio"),
    ("validation.email_invalid", "El correo no es válido"),
    ("validation.password_required", "La contraseña es obligatoria"),
    ("validation.title_required", "El título es obligatorio"),
    ("validation.title_too_long", "El título es demasiado largo"),
    ("status.busy", "Procesando..."),
    ("status.help_public", "Tab: siguiente campo | Enter: enviar | F3/F4/F5: entrar/registro/recuperar | F2: idioma | Esc: salir"),
    ("status.help_home", "n: nueva | e: editar | Espacio: marcar | d: eliminar | r: recargar | L: salir de la cuenta | F2: idioma | Esc: salir"),
    ("status.help_form", "Enter: guardar | Esc: cancelar"),
    ("status.help_confirm", "y: confirmar | n/Esc: cancelar"),
    ("firebase.auth/invalid-credential", "Correo o contraseña incorrectos"),
    ("firebase.auth/user-not-found", "No existe una cuenta con este correo"),
    ("firebase.auth/wrong-password", "Correo o contraseña incorrectos"),
    ("firebase.auth/email-already-in-use", "Este correo ya está registrado"),
    ("firebase.auth/invalid-email", "El correo no es válido"),
    ("firebase.auth/weak-password", "La contraseña es demasiado débil"),
    ("firebase.auth/too-many-requests", "Demasiados intentos, inténtalo más tarde"),
];

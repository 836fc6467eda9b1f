//! Bilingual site copy: page headings, empty states and the messages
//! returned by member actions.
//!
//! Validation errors carry a string code (see [`crate::profile`]) that maps
//! to a [`Message`] through [`Message::from_code`].

use crate::locale::Locale;

/// A piece of user-facing copy available in every locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    // -- Page headings ------------------------------------------------------
    HomeTitle,
    VenturesTitle,
    CaseStudiesTitle,
    ProgramsTitle,
    EventsTitle,
    TeamTitle,
    BlogTitle,
    ProfileTitle,
    SettingsTitle,
    DashboardTitle,
    LoginTitle,

    // -- Empty states -------------------------------------------------------
    NoVentures,
    NoCaseStudies,
    NoPrograms,
    NoEvents,
    NoTeamMembers,
    NoPosts,

    // -- Action outcomes ----------------------------------------------------
    NotAuthenticated,
    InvalidSubmission,
    ProfileUpdated,
    ProfileUpdateFailed,
    RoleSelected,
    RoleAlreadySet,
    PasswordChanged,
    PasswordChangeFailed,
    CurrentPasswordIncorrect,
    AccountDeleted,
    AccountDeleteFailed,
    DeleteConfirmationMismatch,

    // -- Validation ---------------------------------------------------------
    NameRequired,
    NameTooLong,
    BioTooLong,
    FieldTooLong,
    InvalidUrl,
    InvalidEmail,
    InvalidStage,
    InvalidAvailability,
    InvalidVisibility,
    InvalidRole,
    LanguagesRequired,
    InvalidLanguage,
    TooManyExpertise,
    InvalidYearsExperience,
    PasswordTooShort,
    PasswordMismatch,
}

impl Message {
    /// Look up the message for a validation error code.
    pub fn from_code(code: &str) -> Option<Self> {
        let msg = match code {
            "name_required" => Message::NameRequired,
            "name_too_long" => Message::NameTooLong,
            "bio_too_long" => Message::BioTooLong,
            "field_too_long" => Message::FieldTooLong,
            "invalid_url" => Message::InvalidUrl,
            "invalid_email" => Message::InvalidEmail,
            "invalid_stage" => Message::InvalidStage,
            "invalid_availability" => Message::InvalidAvailability,
            "invalid_visibility" => Message::InvalidVisibility,
            "invalid_role" => Message::InvalidRole,
            "languages_required" => Message::LanguagesRequired,
            "invalid_language" => Message::InvalidLanguage,
            "too_many_expertise" => Message::TooManyExpertise,
            "invalid_years_experience" => Message::InvalidYearsExperience,
            "password_too_short" => Message::PasswordTooShort,
            "password_mismatch" => Message::PasswordMismatch,
            _ => return None,
        };
        Some(msg)
    }

    /// The copy for this message in `locale`.
    pub fn text(self, locale: Locale) -> &'static str {
        let (en, fr) = self.pair();
        match locale {
            Locale::En => en,
            Locale::Fr => fr,
        }
    }

    fn pair(self) -> (&'static str, &'static str) {
        match self {
            Message::HomeTitle => ("Building ventures that matter", "Bâtir des entreprises qui comptent"),
            Message::VenturesTitle => ("Our ventures", "Nos entreprises"),
            Message::CaseStudiesTitle => ("Case studies", "Études de cas"),
            Message::ProgramsTitle => ("Programs", "Programmes"),
            Message::EventsTitle => ("Upcoming events", "Événements à venir"),
            Message::TeamTitle => ("Our team", "Notre équipe"),
            Message::BlogTitle => ("Blog", "Blogue"),
            Message::ProfileTitle => ("My profile", "Mon profil"),
            Message::SettingsTitle => ("Account settings", "Paramètres du compte"),
            Message::DashboardTitle => ("Dashboard", "Tableau de bord"),
            Message::LoginTitle => ("Sign in", "Connexion"),

            Message::NoVentures => (
                "No ventures published yet. Check back soon.",
                "Aucune entreprise publiée pour le moment. Revenez bientôt.",
            ),
            Message::NoCaseStudies => (
                "Case studies are coming soon.",
                "Les études de cas arrivent bientôt.",
            ),
            Message::NoPrograms => (
                "Programs will be announced soon.",
                "Les programmes seront annoncés bientôt.",
            ),
            Message::NoEvents => (
                "No upcoming events. Stay tuned.",
                "Aucun événement à venir. Restez à l'affût.",
            ),
            Message::NoTeamMembers => (
                "Team profiles are coming soon.",
                "Les profils de l'équipe arrivent bientôt.",
            ),
            Message::NoPosts => (
                "No articles published yet.",
                "Aucun article publié pour le moment.",
            ),

            Message::NotAuthenticated => (
                "You must be signed in to do that.",
                "Vous devez être connecté pour effectuer cette action.",
            ),
            Message::InvalidSubmission => (
                "The submitted form could not be read.",
                "Le formulaire soumis n'a pas pu être lu.",
            ),
            Message::ProfileUpdated => ("Profile updated.", "Profil mis à jour."),
            Message::ProfileUpdateFailed => (
                "We couldn't update your profile. Please try again.",
                "Impossible de mettre à jour votre profil. Veuillez réessayer.",
            ),
            Message::RoleSelected => ("Welcome aboard!", "Bienvenue parmi nous!"),
            Message::RoleAlreadySet => (
                "Your role has already been chosen.",
                "Votre rôle a déjà été choisi.",
            ),
            Message::PasswordChanged => ("Password changed.", "Mot de passe modifié."),
            Message::PasswordChangeFailed => (
                "We couldn't change your password. Please try again.",
                "Impossible de modifier votre mot de passe. Veuillez réessayer.",
            ),
            Message::CurrentPasswordIncorrect => (
                "Your current password is incorrect.",
                "Votre mot de passe actuel est incorrect.",
            ),
            Message::AccountDeleted => ("Your account has been deleted.", "Votre compte a été supprimé."),
            Message::AccountDeleteFailed => (
                "We couldn't delete your account. Please try again.",
                "Impossible de supprimer votre compte. Veuillez réessayer.",
            ),
            Message::DeleteConfirmationMismatch => (
                "Type DELETE to confirm.",
                "Tapez DELETE pour confirmer.",
            ),

            Message::NameRequired => ("Name is required.", "Le nom est requis."),
            Message::NameTooLong => (
                "Name must be 100 characters or fewer.",
                "Le nom doit contenir au plus 100 caractères.",
            ),
            Message::BioTooLong => (
                "Bio must be 500 characters or fewer.",
                "La biographie doit contenir au plus 500 caractères.",
            ),
            Message::FieldTooLong => ("A field is too long.", "Un champ est trop long."),
            Message::InvalidUrl => (
                "Please enter a valid URL.",
                "Veuillez entrer une URL valide.",
            ),
            Message::InvalidEmail => (
                "Please enter a valid email address.",
                "Veuillez entrer une adresse courriel valide.",
            ),
            Message::InvalidStage => ("Please choose a valid stage.", "Veuillez choisir une étape valide."),
            Message::InvalidAvailability => (
                "Please choose a valid availability.",
                "Veuillez choisir une disponibilité valide.",
            ),
            Message::InvalidVisibility => (
                "Please choose a valid visibility.",
                "Veuillez choisir une visibilité valide.",
            ),
            Message::InvalidRole => ("Please choose a valid role.", "Veuillez choisir un rôle valide."),
            Message::LanguagesRequired => (
                "Select at least one language.",
                "Sélectionnez au moins une langue.",
            ),
            Message::InvalidLanguage => (
                "Languages must be English or French.",
                "Les langues doivent être l'anglais ou le français.",
            ),
            Message::TooManyExpertise => (
                "Choose at most 10 areas of expertise.",
                "Choisissez au plus 10 domaines d'expertise.",
            ),
            Message::InvalidYearsExperience => (
                "Years of experience must be between 0 and 60.",
                "Les années d'expérience doivent être entre 0 et 60.",
            ),
            Message::PasswordTooShort => (
                "Password must be at least 8 characters.",
                "Le mot de passe doit contenir au moins 8 caractères.",
            ),
            Message::PasswordMismatch => (
                "Passwords do not match.",
                "Les mots de passe ne correspondent pas.",
            ),
        }
    }
}

//! The built-in achievement catalog.
//!
//! Display copy is Spanish, matching the app's locale. Ids are stable
//! across releases: they appear in persisted unlock records, so
//! renaming one orphans the user's history.

use crate::special_dates::SpecialMoment;
use crate::stats::{ExerciseCategory, Intensity, Season, Timeframe, UserStats};

use super::{AchievementCatalog, AchievementDefinition, Rarity, Requirement};

fn trained_all_seasons(stats: &UserStats) -> bool {
    stats.seasons_trained() == Season::ALL.len()
}

fn trained_day_and_night(stats: &UserStats) -> bool {
    stats.workouts_in_timeframe(Timeframe::Morning) > 0
        && stats.workouts_in_timeframe(Timeframe::Night) > 0
}

/// The shipped catalog. Panics only on a duplicate id, which is a
/// programming error caught by the tests below.
pub fn builtin() -> AchievementCatalog {
    use Rarity::*;

    let defs = vec![
        // Workout count milestones
        AchievementDefinition::new(
            "first_workout",
            "Primer paso",
            "Completa tu primer entrenamiento",
            Requirement::TotalWorkouts { value: 1 },
            Common,
        ),
        AchievementDefinition::new(
            "workouts_10",
            "Constante",
            "Completa 10 entrenamientos",
            Requirement::TotalWorkouts { value: 10 },
            Common,
        ),
        AchievementDefinition::new(
            "workouts_50",
            "Dedicado",
            "Completa 50 entrenamientos",
            Requirement::TotalWorkouts { value: 50 },
            Rare,
        ),
        AchievementDefinition::new(
            "workouts_100",
            "Imparable",
            "Completa 100 entrenamientos",
            Requirement::TotalWorkouts { value: 100 },
            Epic,
        ),
        // Streaks
        AchievementDefinition::new(
            "streak_3",
            "Racha de 3",
            "Entrena 3 días consecutivos",
            Requirement::ConsecutiveDays { value: 3 },
            Common,
        ),
        AchievementDefinition::new(
            "streak_7",
            "Semana perfecta",
            "Entrena 7 días consecutivos",
            Requirement::ConsecutiveDays { value: 7 },
            Rare,
        ),
        AchievementDefinition::new(
            "streak_30",
            "Hábito de hierro",
            "Entrena 30 días consecutivos",
            Requirement::ConsecutiveDays { value: 30 },
            Epic,
        ),
        // XP tiers
        AchievementDefinition::new(
            "xp_1000",
            "Milenario",
            "Acumula 1.000 puntos de experiencia",
            Requirement::TotalXp { value: 1000 },
            Common,
        ),
        AchievementDefinition::new(
            "xp_10000",
            "Diez mil horas",
            "Acumula 10.000 puntos de experiencia",
            Requirement::TotalXp { value: 10_000 },
            Epic,
        ),
        // Time of day
        AchievementDefinition::new(
            "morning_10",
            "Madrugador",
            "Completa 10 entrenamientos por la mañana",
            Requirement::WorkoutsInTimeframe {
                timeframe: Timeframe::Morning,
                value: 10,
            },
            Common,
        ),
        AchievementDefinition::new(
            "night_10",
            "Noctámbulo",
            "Completa 10 entrenamientos de noche",
            Requirement::WorkoutsInTimeframe {
                timeframe: Timeframe::Night,
                value: 10,
            },
            Rare,
        ),
        // Categories
        AchievementDefinition::new(
            "strength_25",
            "Fuerza bruta",
            "Completa 25 entrenamientos de fuerza",
            Requirement::CategoryCount {
                category: ExerciseCategory::Strength,
                value: 25,
            },
            Rare,
        ),
        AchievementDefinition::new(
            "cardio_25",
            "Corazón de acero",
            "Completa 25 entrenamientos de cardio",
            Requirement::CategoryCount {
                category: ExerciseCategory::Cardio,
                value: 25,
            },
            Rare,
        ),
        AchievementDefinition::new(
            "flexibility_15",
            "Elástico",
            "Completa 15 entrenamientos de flexibilidad",
            Requirement::CategoryCount {
                category: ExerciseCategory::Flexibility,
                value: 15,
            },
            Rare,
        ),
        // Unique exercises
        AchievementDefinition::new(
            "explorer_20",
            "Explorador",
            "Prueba 20 ejercicios distintos",
            Requirement::UniqueExercises { value: 20 },
            Rare,
        ),
        AchievementDefinition::new(
            "explorer_50",
            "Coleccionista",
            "Prueba 50 ejercicios distintos",
            Requirement::UniqueExercises { value: 50 },
            Epic,
        ),
        // Session duration
        AchievementDefinition::new(
            "marathon_session",
            "Maratoniano",
            "Completa un entrenamiento de 90 minutos",
            Requirement::SingleWorkoutDuration { minutes: 90 },
            Rare,
        ),
        // Social
        AchievementDefinition::new(
            "social_5",
            "Comparte el esfuerzo",
            "Comparte 5 entrenamientos",
            Requirement::ShareCount { value: 5 },
            Common,
        ),
        // Form and records
        AchievementDefinition::new(
            "perfect_10",
            "Perfeccionista",
            "Completa 10 entrenamientos con forma perfecta",
            Requirement::PerfectFormCount { value: 10 },
            Rare,
        ),
        AchievementDefinition::new(
            "records_5",
            "Plusmarquista",
            "Bate 5 récords personales",
            Requirement::PersonalRecordCount { value: 5 },
            Rare,
        ),
        // Comeback
        AchievementDefinition::new(
            "comeback_30",
            "Fénix",
            "Vuelve a entrenar tras 30 días de descanso",
            Requirement::ComebackGap { days: 30 },
            Epic,
        )
        .hidden(),
        // Variety
        AchievementDefinition::new(
            "variety_4",
            "Todoterreno",
            "Entrena 4 categorías de ejercicio distintas",
            Requirement::VarietyStreak { value: 4 },
            Rare,
        ),
        // Seasons
        AchievementDefinition::new(
            "summer_10",
            "Verano activo",
            "Completa 10 entrenamientos en verano",
            Requirement::SeasonalCount {
                season: Season::Summer,
                value: 10,
            },
            Common,
        ),
        AchievementDefinition::new(
            "winter_10",
            "Invierno sin excusas",
            "Completa 10 entrenamientos en invierno",
            Requirement::SeasonalCount {
                season: Season::Winter,
                value: 10,
            },
            Rare,
        ),
        // Intensity
        AchievementDefinition::new(
            "extreme_5",
            "Al límite",
            "Completa 5 entrenamientos de intensidad extrema",
            Requirement::IntensityCount {
                intensity: Intensity::Extreme,
                value: 5,
            },
            Epic,
        ),
        // Meta
        AchievementDefinition::new(
            "collector_10",
            "Cazador de logros",
            "Desbloquea 10 logros",
            Requirement::AchievementsUnlocked { value: 10 },
            Epic,
        ),
        // Custom predicates
        AchievementDefinition::new(
            "four_seasons",
            "Cuatro estaciones",
            "Entrena en primavera, verano, otoño e invierno",
            Requirement::Custom {
                predicate: trained_all_seasons,
            },
            Legendary,
        ),
        AchievementDefinition::new(
            "day_and_night",
            "Día y noche",
            "Entrena por la mañana y de madrugada",
            Requirement::Custom {
                predicate: trained_day_and_night,
            },
            Rare,
        ),
        // Special dates, unlocked at event time by the detector
        AchievementDefinition::new(
            "night_owl",
            "Búho nocturno",
            "Entrena a las 3 de la madrugada",
            Requirement::SpecialDate {
                moment: SpecialMoment::NightOwl,
            },
            Rare,
        )
        .secret(),
        AchievementDefinition::new(
            "new_year",
            "Año nuevo, vida nueva",
            "Entrena el 1 de enero",
            Requirement::SpecialDate {
                moment: SpecialMoment::NewYearDay,
            },
            Rare,
        ),
        AchievementDefinition::new(
            "birthday_workout",
            "Cumpleaños activo",
            "Entrena el día de tu cumpleaños",
            Requirement::SpecialDate {
                moment: SpecialMoment::Birthday,
            },
            Epic,
        )
        .secret(),
        AchievementDefinition::new(
            "early_monday",
            "Lunes de campeones",
            "Entrena un lunes a las 5 de la mañana",
            Requirement::SpecialDate {
                moment: SpecialMoment::EarlyMonday,
            },
            Rare,
        )
        .secret(),
        AchievementDefinition::new(
            "weekend_sunrise",
            "Amanecer de finde",
            "Entrena un fin de semana antes de las 9",
            Requirement::SpecialDate {
                moment: SpecialMoment::WeekendSunrise,
            },
            Common,
        ),
    ];

    AchievementCatalog::new(defs).expect("built-in catalog has unique ids")
}

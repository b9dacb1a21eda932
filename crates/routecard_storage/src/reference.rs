//! Reference catalog: personnel and casting lists offered by the form.

use crate::error::StorageResult;
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, instrument};

/// A personnel or simple-name list in the reference catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceList {
    /// Assembly controllers (control step executors).
    AssemblyControllers,
    /// Assemblers (gluing step executors).
    Assemblers,
    /// Experiment types.
    ExperimentTypes,
    /// Senior melting shift leads.
    MeltingShiftLeads,
    /// Melting participants.
    MeltingParticipants,
    /// Heat-treatment specialists.
    HeatTreatment,
    /// Shot-blasting specialists.
    ShotBlasting,
    /// Cutting specialists.
    Cutting,
    /// Grinding specialists.
    Grinding,
    /// Quality controllers.
    Controllers,
}

impl ReferenceList {
    /// Every list, in catalog order.
    pub const ALL: [ReferenceList; 10] = [
        Self::AssemblyControllers,
        Self::Assemblers,
        Self::ExperimentTypes,
        Self::MeltingShiftLeads,
        Self::MeltingParticipants,
        Self::HeatTreatment,
        Self::ShotBlasting,
        Self::Cutting,
        Self::Grinding,
        Self::Controllers,
    ];

    /// Table backing this list.
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::AssemblyControllers => "assembly_controllers",
            Self::Assemblers => "assemblers",
            Self::ExperimentTypes => "experiment_types",
            Self::MeltingShiftLeads => "melting_shift_leads",
            Self::MeltingParticipants => "melting_participants",
            Self::HeatTreatment => "heat_treatment_specialists",
            Self::ShotBlasting => "shot_blasting_specialists",
            Self::Cutting => "cutting_specialists",
            Self::Grinding => "grinding_specialists",
            Self::Controllers => "controllers",
        }
    }

    /// Looks a list up by its table name.
    #[must_use]
    pub fn from_table(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|list| list.table() == name)
    }

    fn defaults(self) -> &'static [&'static str] {
        match self {
            Self::AssemblyControllers => &["Елхова", "Малых", "Романцева", "Шестункина"],
            Self::Assemblers => &["Буцик", "Минакова", "Ротарь", "Чернова", "Чупахина"],
            Self::ExperimentTypes => &["Бумага", "Волокно"],
            Self::MeltingShiftLeads => &["Белков", "Валиулин", "Ермаков", "Карасев"],
            Self::MeltingParticipants => &[
                "Беляев",
                "Волков",
                "Исмаилов",
                "Кокшин",
                "Левин",
                "Политов",
                "Рабинович",
                "Семенов",
                "Терентьев",
            ],
            Self::HeatTreatment | Self::ShotBlasting => &["Аюбов", "Эгамов"],
            Self::Cutting => &[
                "Абдухакимов",
                "Ахмаджонов",
                "Исмаилов",
                "Косимов",
                "Косимов-2",
                "Машрапов",
                "Отаназаров",
                "Самиев",
                "Туичиев",
                "Эргашев",
            ],
            Self::Grinding => &["Абдуллаев", "Бурхонов", "Матесаев", "Отаназаров", "Самиев"],
            Self::Controllers => &["Елхова", "Лабуткина", "Рябова", "Улитина"],
        }
    }
}

/// Casting families known to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastingFamily {
    /// Lost-foam castings; labelled `"{name} {number}"`.
    Lgm,
    /// Pressure die castings; labelled `"{number} {name}"`.
    Lpd,
    /// Everything else; name only.
    Other,
}

impl CastingFamily {
    /// Every family, in catalog order.
    pub const ALL: [CastingFamily; 3] = [Self::Lgm, Self::Lpd, Self::Other];

    /// Looks a family up by its table name.
    #[must_use]
    pub fn from_table(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|family| family.table() == name)
    }

    /// Table backing this family.
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::Lgm => "lgm_castings",
            Self::Lpd => "lpd_castings",
            Self::Other => "other_castings",
        }
    }

    fn defaults(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Lgm => &[
                ("ЛСКМ.03.01.102-Л1", "Держатель ригеля"),
                ("ЛСКМ.03.51.102-Л", "Держатель ригеля OPTIMA"),
                ("ЛСКМ.04.00.004-Л", "Держатель диагонали"),
                ("ЛСКМ.04.00.002-Л", "Держатель диагонали"),
                ("ОКР-2410.02.000", "Вороток"),
                ("ЛСКМ.00.03.202-Л", "Вороток"),
                ("ЛСКМ.98.53.101-Л", "Соединитель угловой"),
                ("ЛСКМ.98.14.001-Л", "Адаптер"),
                ("ЛСКМ.00.06.001-Л U1", "Накладка для резьбы домкрата"),
                ("АМ.3509030-130 3Г", "Блок-картер 2 цилиндра"),
                ("5У.01.001-V15m1", "ПНГ"),
                ("Н2А.03М.01.01-Л", "Полухомут верхний"),
                ("Н2А.05М.02.01-Л", "Полухомут нижний"),
            ],
            Self::Lpd => &[
                ("8450090064-Л", "Корпус шкива опорного"),
                ("2123-1011371-Л", "Фиксатор шестерни привода масляного насоса"),
                ("21214-1011371-Л", "Фиксатор шестерни привода масляного насоса"),
                ("11189-1041034-Л", "Кронштейн генератора"),
                ("11189-1041034-10-Л", "Кронштейн генератора"),
                ("21082-3701652-Л", "Кронштейн генератора нижний"),
                ("21214-3701652-Л", "Кронштейн генератора нижний"),
                ("8450036497-Л", "Кронштейн крепления передней защитной крышки"),
                ("850120774-Л", "Кронштейн вспомогательных агрегатов"),
            ],
            Self::Other => &[
                ("", "Чугун"),
                ("", "Колесо РИТМ"),
                ("", "Скоба"),
                ("", "Лопасть"),
                ("", "Корпус"),
                ("", "Изложница"),
                ("", "Защита"),
                ("", "Кольцо вкладыш"),
            ],
        }
    }
}

/// A casting entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Casting {
    /// Part number; absent for [`CastingFamily::Other`].
    pub number: Option<String>,
    /// Part name.
    pub name: String,
}

/// Read-only lookups of personnel names and castings.
///
/// Backed by its own SQLite database. Only [`ReferenceCatalog::seed_defaults`]
/// writes, and only into empty tables.
#[derive(Debug)]
pub struct ReferenceCatalog {
    conn: Connection,
}

impl ReferenceCatalog {
    /// Opens (or creates) the catalog at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn open(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;
        debug!("opened reference catalog");
        Ok(Self { conn })
    }

    /// Opens an in-memory catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if SQLite cannot allocate the database.
    pub fn open_in_memory() -> StorageResult<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Creates every table and fills the empty ones with the shop defaults.
    ///
    /// Returns the number of tables that were filled.
    ///
    /// # Errors
    ///
    /// Returns an error if a table cannot be created or written.
    pub fn seed_defaults(&mut self) -> StorageResult<usize> {
        let tx = self.conn.transaction()?;
        let mut filled = 0;

        for list in ReferenceList::ALL {
            let table = list.table();
            tx.execute_batch(&format!(
                "CREATE TABLE IF NOT EXISTS {table} (name TEXT NOT NULL)"
            ))?;
            if table_is_empty(&tx, table)? {
                let mut stmt = tx.prepare(&format!("INSERT INTO {table} (name) VALUES (?1)"))?;
                for name in list.defaults() {
                    stmt.execute([name])?;
                }
                filled += 1;
                info!(table, "reference table seeded");
            }
        }

        for family in CastingFamily::ALL {
            let table = family.table();
            tx.execute_batch(&format!(
                "CREATE TABLE IF NOT EXISTS {table} (number TEXT, name TEXT NOT NULL)"
            ))?;
            if table_is_empty(&tx, table)? {
                let mut stmt =
                    tx.prepare(&format!("INSERT INTO {table} (number, name) VALUES (?1, ?2)"))?;
                for (number, name) in family.defaults() {
                    let number = (!number.is_empty()).then_some(*number);
                    stmt.execute(params![number, name])?;
                }
                filled += 1;
                info!(table, "reference table seeded");
            }
        }

        tx.commit()?;
        Ok(filled)
    }

    /// Returns the names of a list in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is missing or cannot be read.
    pub fn names(&self, list: ReferenceList) -> StorageResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT name FROM {} ORDER BY rowid", list.table()))?;
        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(names)
    }

    /// Returns the castings of a family in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is missing or cannot be read.
    pub fn castings(&self, family: CastingFamily) -> StorageResult<Vec<Casting>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT number, name FROM {} ORDER BY rowid",
            family.table()
        ))?;
        let castings = stmt
            .query_map([], |row| {
                Ok(Casting {
                    number: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(castings)
    }

    /// Finds the family and name of a numbered casting.
    ///
    /// # Errors
    ///
    /// Returns an error if a casting table cannot be read.
    pub fn find_casting(&self, number: &str) -> StorageResult<Option<(CastingFamily, String)>> {
        for family in [CastingFamily::Lgm, CastingFamily::Lpd] {
            let name: Option<String> = self
                .conn
                .query_row(
                    &format!("SELECT name FROM {} WHERE number = ?1", family.table()),
                    [number],
                    |row| row.get(0),
                )
                .optional()?;
            if let Some(name) = name {
                return Ok(Some((family, name)));
            }
        }
        Ok(None)
    }

    /// Builds the casting line printed on a route card.
    ///
    /// LGM castings read `"{name} {number}"`, LPD castings
    /// `"{number} {name}"`. Anything else falls back to `fallback_name`.
    ///
    /// # Errors
    ///
    /// Returns an error if a casting table cannot be read.
    pub fn cast_label(
        &self,
        number: Option<&str>,
        fallback_name: Option<&str>,
    ) -> StorageResult<String> {
        let found = match number {
            Some(number) if !number.is_empty() => self
                .find_casting(number)?
                .map(|(family, name)| (family, name, number)),
            _ => None,
        };

        Ok(match found {
            Some((CastingFamily::Lgm, name, number)) => format!("{name} {number}"),
            Some((_, name, number)) => format!("{number} {name}"),
            None => fallback_name.unwrap_or_default().to_string(),
        })
    }
}

fn table_is_empty(conn: &Connection, table: &str) -> rusqlite::Result<bool> {
    let sql = format!("SELECT COUNT(*) FROM {table}");
    let count: i64 = conn.query_row(&sql, [], |row| row.get(0))?;
    Ok(count == 0)
}

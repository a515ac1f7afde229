//! Genes, genomes and the mutation operator.
//!
//! A genome is a set of named dice sequences. Genes are materialized lazily:
//! asking for a missing gene creates it empty, and reading past the end of a
//! gene rolls new dice onto it. Mutation never touches a genome in place,
//! it produces a new one.

use std::fmt;

use rand::Rng;

use super::dice::{DICE, Die, Roll, deserialize_dice, fair_roll, serialize_dice};
use super::reader::GeneReader;
use crate::schema::{GeneData, GeneName};

/// Rerolls attempted before picking a different face directly.
const MAX_REROLLS: usize = 64;

/// One named dice sequence and the number of mutations it went through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gene {
    pub name: GeneName,
    /// Mutations this gene has been through, kept across storage.
    pub tosses: u32,
    /// Grows on demand as readers run past the end.
    pub dice: Vec<Die>,
}

impl Gene {
    pub fn new(name: GeneName) -> Self {
        Self {
            name,
            tosses: 0,
            dice: Vec::new(),
        }
    }

    fn from_data(data: &GeneData) -> Self {
        Self {
            name: data.gene_name,
            tosses: data.tosses,
            dice: deserialize_dice(&data.gene_string),
        }
    }

    fn to_data(&self) -> GeneData {
        GeneData {
            gene_name: self.name,
            tosses: self.tosses,
            gene_string: serialize_dice(&self.dice),
        }
    }

    /// Toss one die: append to an empty gene, otherwise replace a random
    /// position with a different face.
    fn mutate<R: Rng + ?Sized>(&mut self, roll: &Roll, rng: &mut R) {
        if self.dice.is_empty() {
            self.dice.push(roll());
        } else {
            let position = rng.gen_range(0..self.dice.len());
            let current = self.dice[position];
            let replacement = (0..MAX_REROLLS)
                .map(|_| roll())
                .find(|&die| die != current)
                .unwrap_or_else(|| {
                    let offset = rng.gen_range(1..DICE.len());
                    DICE[(current.index() + offset) % DICE.len()]
                });
            self.dice[position] = replacement;
        }
        self.tosses += 1;
    }
}

/// Get-or-create lookup. Keeps at most one gene per name.
fn gene_entry(genes: &mut Vec<Gene>, name: GeneName) -> &mut Gene {
    match genes.iter().position(|gene| gene.name == name) {
        Some(index) => &mut genes[index],
        None => {
            genes.push(Gene::new(name));
            let last = genes.len() - 1;
            &mut genes[last]
        }
    }
}

/// A name-unique collection of genes bound to a dice-rolling function.
#[derive(Clone)]
pub struct Genome {
    roll: Roll,
    genes: Vec<Gene>,
}

/// Genome with no genes and fair dice.
pub fn empty_genome() -> Genome {
    Genome::new(fair_roll(), Vec::new())
}

impl Genome {
    /// Create from genes. Later duplicates of a name are dropped.
    pub fn new(roll: Roll, genes: Vec<Gene>) -> Self {
        let mut unique: Vec<Gene> = Vec::with_capacity(genes.len());
        for gene in genes {
            if unique.iter().any(|g| g.name == gene.name) {
                log::debug!("Dropping duplicate gene {}", gene.name);
                continue;
            }
            unique.push(gene);
        }
        Self {
            roll,
            genes: unique,
        }
    }

    /// Rebuild from stored gene data with fair dice.
    pub fn from_gene_data(data: &[GeneData]) -> Self {
        Self::from_gene_data_with_roll(fair_roll(), data)
    }

    /// Rebuild from stored gene data, sharing an existing roll function.
    pub fn from_gene_data_with_roll(roll: Roll, data: &[GeneData]) -> Self {
        Self::new(roll, data.iter().map(Gene::from_data).collect())
    }

    pub fn roll(&self) -> &Roll {
        &self.roll
    }

    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    pub fn gene(&self, name: GeneName) -> Option<&Gene> {
        self.genes.iter().find(|gene| gene.name == name)
    }

    /// The named gene, created empty if missing.
    pub fn gene_mut(&mut self, name: GeneName) -> &mut Gene {
        gene_entry(&mut self.genes, name)
    }

    /// Fresh cursor at the start of the named gene.
    pub fn create_reader(&mut self, name: GeneName) -> GeneReader<'_> {
        let roll = &self.roll;
        GeneReader::new(gene_entry(&mut self.genes, name), roll)
    }

    /// Twitch budget per cycle, growing sub-linearly with the most-mutated gene.
    pub fn total_twitches(&self) -> usize {
        let max_tosses = self.genes.iter().map(|gene| gene.tosses).max().unwrap_or(0);
        (max_tosses as f64).powf(0.66).floor() as usize + 2
    }

    /// Sum of all genes' tosses.
    pub fn tosses(&self) -> u32 {
        self.genes.iter().map(|gene| gene.tosses).sum()
    }

    /// Copy this genome and toss one die in each target gene.
    ///
    /// With `mutate_twitch_config` the twitch timing gene is tossed as well
    /// and its toss counter bumped once more.
    pub fn with_mutations<R: Rng + ?Sized>(
        &self,
        targets: &[GeneName],
        mutate_twitch_config: bool,
        rng: &mut R,
    ) -> Genome {
        let mut genes = self.genes.clone();
        for &name in targets {
            gene_entry(&mut genes, name).mutate(&self.roll, rng);
        }
        if mutate_twitch_config {
            let twitch_gene = gene_entry(&mut genes, GeneName::TwitchConfig);
            twitch_gene.mutate(&self.roll, rng);
            twitch_gene.tosses += 1;
        }
        Genome {
            roll: self.roll.clone(),
            genes,
        }
    }

    /// Wire form of every gene, in creation order.
    pub fn gene_data(&self) -> Vec<GeneData> {
        self.genes.iter().map(Gene::to_data).collect()
    }
}

impl fmt::Debug for Genome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Genome").field("genes", &self.genes).finish()
    }
}

impl fmt::Display for Genome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary: Vec<String> = self
            .genes
            .iter()
            .map(|gene| format!("({}:{})", gene.name, gene.tosses))
            .collect();
        f.write_str(&summary.join(", "))
    }
}
